// SPDX-License-Identifier: LGPL-3.0-only

pub use vello::AaConfig;

use crate::vgi::backend::Backend;

/// Default number of operations a fresh recorder reserves room for.
pub const DEFAULT_BUILDER_CAPACITY: usize = 64;

/// Renderer configuration.
///
/// [Default] reads the environment, so applications can tweak rendering
/// without recompiling:
///
/// - `TESSERA_RENDERER`: see [Backend::from_env].
/// - `TESSERA_ANTIALIASING`: `area` (default), `msaa8` or `msaa16`.
/// - `TESSERA_BUILDER_CAPACITY`: initial operation capacity of recorders
///   created through a [Renderer](crate::vgi::renderer::Renderer).
/// - `TESSERA_WARN_UNBALANCED`: `false`/`0`/`off` silences warnings about
///   `restore` calls without a matching `save`.
#[derive(Clone)]
pub struct RenderConfig {
    /// The rendering backend to use
    pub backend: Backend,
    /// The antialiasing config handed to the GPU renderer
    pub antialiasing: AaConfig,
    /// Initial operation capacity for recorders
    pub builder_capacity: usize,
    /// If surface canvases should log unbalanced `restore` calls
    pub warn_unbalanced: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let antialiasing = match std::env::var("TESSERA_ANTIALIASING") {
            Ok(val) => parse_antialiasing(&val),
            Err(_) => AaConfig::Area,
        };

        let builder_capacity = match std::env::var("TESSERA_BUILDER_CAPACITY") {
            Ok(val) => parse_capacity(&val),
            Err(_) => DEFAULT_BUILDER_CAPACITY,
        };

        let warn_unbalanced = match std::env::var("TESSERA_WARN_UNBALANCED") {
            Ok(val) => parse_flag(&val, true),
            Err(_) => true,
        };

        Self {
            backend: Backend::from_env(),
            antialiasing,
            builder_capacity,
            warn_unbalanced,
        }
    }
}

impl RenderConfig {
    /// A configuration that ignores the environment.
    pub fn fixed() -> Self {
        Self {
            backend: Backend::Vello,
            antialiasing: AaConfig::Area,
            builder_capacity: DEFAULT_BUILDER_CAPACITY,
            warn_unbalanced: true,
        }
    }
}

fn parse_antialiasing(val: &str) -> AaConfig {
    match val.to_lowercase().as_str() {
        "msaa8" => {
            log::info!("TESSERA_ANTIALIASING=msaa8 detected; using MSAA 8x");
            AaConfig::Msaa8
        },
        "msaa16" => {
            log::info!("TESSERA_ANTIALIASING=msaa16 detected; using MSAA 16x");
            AaConfig::Msaa16
        },
        "area" | "" => AaConfig::Area,
        other => {
            log::warn!("Unknown antialiasing '{}'; using area", other);
            AaConfig::Area
        },
    }
}

fn parse_capacity(val: &str) -> usize {
    match val.trim().parse::<usize>() {
        Ok(capacity) => {
            log::info!("TESSERA_BUILDER_CAPACITY={} detected", capacity);
            capacity
        },
        Err(_) => {
            log::warn!(
                "TESSERA_BUILDER_CAPACITY='{}' is not a count; using {}",
                val,
                DEFAULT_BUILDER_CAPACITY
            );
            DEFAULT_BUILDER_CAPACITY
        },
    }
}

fn parse_flag(val: &str, default: bool) -> bool {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enable" => true,
        "false" | "0" | "no" | "off" | "disable" => false,
        other => {
            log::warn!("Expected a boolean, got '{}'; using {}", other, default);
            default
        },
    }
}
