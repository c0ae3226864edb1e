//! yt-dlp adapter and format selection for the Questube redirector.
//!
//! [`YtDlpResolver`] shells out to the configured yt-dlp executable and
//! parses its `-J` JSON document; [`select_format`] picks the single
//! variant a Quest client should be redirected to.

pub mod select;
pub mod ytdlp;

pub use select::{default_containers, select_format};
pub use ytdlp::YtDlpResolver;
