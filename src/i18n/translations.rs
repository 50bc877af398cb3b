//! Static translation tables, one per language.

/// English strings. Every key the studio renders must be present here.
pub(super) const EN: &[(&str, &str)] = &[
    ("main_title", "AI Image Studio"),
    ("main_subtitle", "Your Creative Vision, Realized"),
    // Labels
    ("before_label", "Before"),
    ("after_label", "After"),
    ("editing_instructions_label", "Editing Instructions"),
    ("image_prompt_label", "Image Prompt"),
    ("model_label", "Model"),
    ("aspect_ratio_label", "Aspect Ratio"),
    ("language_label", "Language"),
    ("reference_label", "Reference"),
    // Placeholders
    ("prompt_placeholder_nano", "e.g., add sunglasses, make the background a beach..."),
    ("prompt_placeholder_imagen", "A futuristic cityscape at sunset, neon lights on wet streets..."),
    ("canvas_placeholder", "Your generated image will appear here."),
    // Buttons & actions
    ("generate_button", "Generate Image"),
    ("generating_button", "Generating..."),
    ("upload_reference", "Upload Reference"),
    ("download_png_button", "Download PNG"),
    ("save_close_button", "Save & Close"),
    // Overlays
    ("edit_prompt_title", "Edit Your Prompt"),
    ("generated_image_title", "Generated Image"),
    ("reference_image_alt", "Reference"),
    // Status & info
    ("aspect_ratio_not_applicable", "Aspect ratio is not applicable."),
    ("loading_title", "Brewing creativity..."),
    ("loading_description", "Your image is being generated. This might take a moment."),
    ("saved_to", "Saved to"),
    ("help_text", "Type a prompt, then /generate. Commands: /model imagen-4|nano-banana, /ratio 1:1|16:9|9:16|4:3|3:4, /upload <file>, /clear, /edit, /save, /cancel, /view, /close, /download [path], /lang en|id, /status, /help, /quit"),
    ("unknown_command", "Unknown command. Type /help for the list of commands."),
    ("unknown_model", "Unknown model. Choose imagen-4 or nano-banana."),
    ("unknown_aspect_ratio", "Unsupported aspect ratio. Choose 1:1, 16:9, 9:16, 4:3 or 3:4."),
    ("unknown_language", "Unsupported language. Choose en or id."),
    (
        "upload_not_available",
        "Reference images are only used by Nano Banana. Switch with /model nano-banana.",
    ),
    ("generation_in_progress", "A generation is already in progress."),
    ("no_image_to_download", "There is no generated image to download yet."),
    ("download_failed", "Failed to save the image."),
    // Errors
    ("error_title", "Oops! Something went wrong."),
    ("error_quota", "You have exceeded your API request quota. Please check your plan and billing details, or try again later."),
    ("error_api_key", "The API key is invalid or has expired. Please check your configuration."),
    ("error_api_key_not_configured", "The application's API key is not configured. Ensure the GEMINI_API_KEY or API_KEY environment variable is set."),
    ("error_generic", "Failed to generate image. The service may be busy or the prompt could be inappropriate. Please try again later."),
    ("error_no_images_returned", "Image generation failed: No images were returned."),
    ("error_prompt_or_image_required", "Please enter a prompt or upload an image to generate."),
    ("error_prompt_or_image_required_for_edit", "A prompt or an image is required to generate a new image."),
    ("error_invalid_image_file", "Please upload a valid image file (PNG, JPEG, WEBP)."),
    ("error_read_file", "Failed to read the image file."),
    ("error_unknown", "An unknown error occurred."),
];

/// Indonesian strings. Missing keys fall back to English.
pub(super) const ID: &[(&str, &str)] = &[
    ("main_title", "Studio Gambar AI"),
    ("main_subtitle", "Visi Kreatif Anda, Terwujud"),
    // Labels
    ("before_label", "Sebelum"),
    ("after_label", "Sesudah"),
    ("editing_instructions_label", "Instruksi Penyuntingan"),
    ("image_prompt_label", "Prompt Gambar"),
    ("model_label", "Model"),
    ("aspect_ratio_label", "Rasio Aspek"),
    ("language_label", "Bahasa"),
    ("reference_label", "Referensi"),
    // Placeholders
    ("prompt_placeholder_nano", "cth: tambahkan kacamata, ubah latar jadi pantai..."),
    ("prompt_placeholder_imagen", "Pemandangan kota futuristik saat senja, lampu neon di jalan basah..."),
    ("canvas_placeholder", "Gambar yang Anda hasilkan akan muncul di sini."),
    // Buttons & actions
    ("generate_button", "Hasilkan Gambar"),
    ("generating_button", "Menghasilkan..."),
    ("upload_reference", "Unggah Referensi"),
    ("download_png_button", "Unduh PNG"),
    ("save_close_button", "Simpan & Tutup"),
    // Overlays
    ("edit_prompt_title", "Sunting Prompt Anda"),
    ("generated_image_title", "Gambar yang Dihasilkan"),
    ("reference_image_alt", "Referensi"),
    // Status & info
    ("aspect_ratio_not_applicable", "Rasio aspek tidak berlaku."),
    ("loading_title", "Meracik kreativitas..."),
    ("loading_description", "Gambar Anda sedang dibuat. Ini mungkin perlu beberapa saat."),
    ("saved_to", "Disimpan ke"),
    ("help_text", "Ketik prompt, lalu /generate. Perintah: /model imagen-4|nano-banana, /ratio 1:1|16:9|9:16|4:3|3:4, /upload <file>, /clear, /edit, /save, /cancel, /view, /close, /download [path], /lang en|id, /status, /help, /quit"),
    ("unknown_command", "Perintah tidak dikenal. Ketik /help untuk daftar perintah."),
    ("unknown_model", "Model tidak dikenal. Pilih imagen-4 atau nano-banana."),
    ("unknown_aspect_ratio", "Rasio aspek tidak didukung. Pilih 1:1, 16:9, 9:16, 4:3 atau 3:4."),
    ("unknown_language", "Bahasa tidak didukung. Pilih en atau id."),
    (
        "upload_not_available",
        "Gambar referensi hanya dipakai oleh Nano Banana. Ganti dengan /model nano-banana.",
    ),
    ("generation_in_progress", "Pembuatan gambar sedang berlangsung."),
    ("no_image_to_download", "Belum ada gambar yang dihasilkan untuk diunduh."),
    ("download_failed", "Gagal menyimpan gambar."),
    // Errors
    ("error_title", "Ups! Terjadi kesalahan."),
    ("error_quota", "Anda telah melampaui kuota permintaan API Anda. Silakan periksa paket dan detail tagihan Anda, atau coba lagi nanti."),
    ("error_api_key", "Kunci API tidak valid atau telah kedaluwarsa. Silakan periksa konfigurasi Anda."),
    ("error_api_key_not_configured", "Kunci API aplikasi tidak dikonfigurasi. Pastikan environment variable GEMINI_API_KEY atau API_KEY sudah diatur."),
    ("error_generic", "Gagal menghasilkan gambar. Layanan mungkin sibuk atau prompt tidak pantas. Silakan coba lagi nanti."),
    ("error_no_images_returned", "Pembuatan gambar gagal: Tidak ada gambar yang dikembalikan."),
    ("error_prompt_or_image_required", "Silakan masukkan prompt atau unggah gambar untuk menghasilkan."),
    ("error_prompt_or_image_required_for_edit", "Prompt atau gambar diperlukan untuk menghasilkan gambar baru."),
    ("error_invalid_image_file", "Silakan unggah file gambar yang valid (PNG, JPEG, WEBP)."),
    ("error_read_file", "Gagal membaca file gambar."),
    ("error_unknown", "Terjadi kesalahan yang tidak diketahui."),
];
