//! Adapters for the image service port: `live` talks to the Gemini API,
//! `recording` captures its traffic to a cassette and `replaying` serves a
//! cassette back without network access.

pub mod live;
pub mod recording;
pub mod replaying;
