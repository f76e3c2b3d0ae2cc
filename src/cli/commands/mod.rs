//! CLI command implementations.

mod config;
mod doctor;
mod generate;
mod init;
mod meetings;
mod preview;
mod serve;
mod share;
mod transcribe;

pub use config::run_config;
pub use doctor::run_doctor;
pub use generate::run_generate;
pub use init::run_init;
pub use meetings::run_meetings;
pub use preview::run_preview;
pub use serve::run_serve;
pub use share::run_share;
pub use transcribe::run_transcribe;
