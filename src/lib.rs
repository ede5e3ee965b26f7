pub mod config;
pub mod processing;
pub mod utils;

pub use processing::channel::Channel;
pub use processing::draws::{DrawSource, FixedDraws, RandomDraws};
pub use processing::monitor::{ChannelUpdate, Monitor, TickReport};
pub use processing::parameters::{ParameterSnapshot, ParameterStore};
pub use processing::roc::{
    analyze, build_roc_laplace, build_roc_zdomain, unit_circle, LaplaceRoc, PlotWindow, RocError,
    ZRoc,
};
