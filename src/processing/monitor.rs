use colored::Colorize;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::buffer::RollingBuffer;
use super::channel::Channel;
use super::draws::{DrawSource, RandomDraws};
use super::fft::{dominant_frequency, magnitude_spectrum, sampling_rate, SpectrumPoint};
use super::generators::generate;
use super::parameters::ParameterSnapshot;
use crate::config::{Config, ConfigError, MonitorConfig};
use crate::utils::log::{log_with_header, LOG_DIR};

pub const LOG_FILE: &str = "monitor.log";

// -----------------------------------------------------------------------------
// TICK OUTPUT
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelUpdate {
    pub latest_sample: f64,
    pub spectrum: Vec<SpectrumPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// Zero-based index of this tick.
    pub tick: u64,
    pub updates: BTreeMap<Channel, ChannelUpdate>,
}

impl TickReport {
    pub fn get(&self, channel: Channel) -> Option<&ChannelUpdate> {
        self.updates.get(&channel)
    }
}

// -----------------------------------------------------------------------------
// MONITOR
// -----------------------------------------------------------------------------

/// Owns one rolling buffer per channel and advances them one tick at a time.
pub struct Monitor<D: DrawSource> {
    config: MonitorConfig,
    buffers: Vec<RollingBuffer>,
    draws: D,
    tick_count: u64,
    log_dir: PathBuf,
}

impl Monitor<RandomDraws<StdRng>> {
    /// Builds a monitor with a seeded generator when the config carries a seed.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let draws = match config.seed {
            Some(seed) => RandomDraws::seeded(seed),
            None => RandomDraws::from_entropy(),
        };
        Monitor::new(config.monitor.clone(), draws)
    }
}

impl<D: DrawSource> Monitor<D> {
    pub fn new(config: MonitorConfig, draws: D) -> Result<Self, ConfigError> {
        config.validate()?;
        let buffers = Channel::ALL
            .iter()
            .map(|_| RollingBuffer::new(config.buffer_capacity))
            .collect();
        Ok(Self {
            config,
            buffers,
            draws,
            tick_count: 0,
            log_dir: PathBuf::from(LOG_DIR),
        })
    }

    /// Redirects tick logging away from `./logs`.
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    /// Generates one sample per channel, appends it, and recomputes every spectrum.
    pub fn tick(&mut self, snapshot: &ParameterSnapshot) -> TickReport {
        let rate = self.sampling_rate();
        let mut updates = BTreeMap::new();

        for channel in Channel::ALL {
            let draw = if channel.uses_noise() {
                self.draws.next_draw()
            } else {
                0.5
            };
            let sample = generate(channel, snapshot, draw);

            let buffer = &mut self.buffers[channel.index()];
            buffer.append(sample);
            let spectrum = magnitude_spectrum(&buffer.contents(), rate);

            updates.insert(
                channel,
                ChannelUpdate {
                    latest_sample: sample,
                    spectrum,
                },
            );
        }

        let report = TickReport {
            tick: self.tick_count,
            updates,
        };
        self.tick_count += 1;

        if self.config.logging {
            self.log_report(&report);
        }
        report
    }

    pub fn buffer(&self, channel: Channel) -> &RollingBuffer {
        &self.buffers[channel.index()]
    }

    pub fn buffer_contents(&self, channel: Channel) -> Vec<f64> {
        self.buffer(channel).contents()
    }

    /// Seconds since the oldest buffered sample, one entry per sample.
    pub fn time_axis(&self, channel: Channel) -> Vec<f64> {
        let step = self.config.tick_period_ms as f64 / 1000.0;
        (0..self.buffer(channel).len())
            .map(|i| i as f64 * step)
            .collect()
    }

    pub fn spectrum(&self, channel: Channel) -> Vec<SpectrumPoint> {
        magnitude_spectrum(&self.buffer_contents(channel), self.sampling_rate())
    }

    pub fn sampling_rate(&self) -> f64 {
        sampling_rate(self.config.tick_period_ms)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    fn log_report(&self, report: &TickReport) {
        let summary = report
            .updates
            .iter()
            .map(|(channel, update)| {
                let peak = dominant_frequency(&update.spectrum)
                    .map(|p| format!("{:.3} Hz ({:.4})", p.frequency, p.magnitude))
                    .unwrap_or_else(|| "-".to_string());
                format!(
                    "{}: sample {:.4}, peak {}",
                    channel, update.latest_sample, peak
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let header = format!("tick {}", report.tick);
        if let Err(e) = log_with_header(&self.log_dir, LOG_FILE, &header, &summary) {
            eprintln!("{} {}", "Failed to write tick log:".red(), e);
        }
    }
}
