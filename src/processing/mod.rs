pub mod buffer;
pub mod channel;
pub mod draws;
pub mod fft;
pub mod generators;
pub mod monitor;
pub mod parameters;
pub mod roc;
