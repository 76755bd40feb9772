/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Quern framework.
///
/// All configurable values, loaded from a TOML file in the XDG-compliant
/// configuration directory, falling back to defaults when absent or
/// malformed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuernConfig {
    /// Timeout configuration
    pub timeouts: TimeoutConfig,
    /// Default values configuration
    pub defaults: DefaultsConfig,
}

/// Timeout-related configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Bound on `ActorRuntime::shutdown_all`, in milliseconds
    pub system_shutdown_timeout_ms: u64,
}

/// Default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default actor name when none provided
    pub actor_name: String,
    /// Default fairness flag for new actors
    pub fair: bool,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            system_shutdown_timeout_ms: 30_000,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            actor_name: "actor".to_string(),
            fair: false,
        }
    }
}

impl QuernConfig {
    /// Convert system shutdown timeout to Duration
    pub const fn system_shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.system_shutdown_timeout_ms)
    }

    /// Load configuration from XDG-compliant locations
    ///
    /// Looks for `quern/config.toml` under the XDG configuration directories
    /// (e.g. `$XDG_CONFIG_HOME/quern/config.toml`). If no configuration file
    /// is found, returns the default configuration. If a configuration file
    /// exists but is malformed, logs an error and uses defaults.
    pub fn load() -> Self {
        use tracing::{error, info};

        let xdg_dirs = match xdg::BaseDirectories::with_prefix("quern") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        let config_path = xdg_dirs.find_config_file("config.toml");

        if let Some(path) = config_path {
            info!("Loading configuration from: {}", path.display());
            match std::fs::read_to_string(&path) {
                Ok(config_str) => match toml::from_str::<Self>(&config_str) {
                    Ok(config) => config,
                    Err(e) => {
                        error!("Failed to parse configuration file {}: {}", path.display(), e);
                        Self::default()
                    }
                },
                Err(e) => {
                    error!("Failed to read configuration file {}: {}", path.display(), e);
                    Self::default()
                }
            }
        } else {
            info!("No configuration file found, using defaults");
            Self::default()
        }
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations
    pub static ref CONFIG: QuernConfig = QuernConfig::load();
}
