// SPDX-License-Identifier: LGPL-3.0-only

//! Backend selection for surface canvases.

/// The rendering backend to use.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Backend {
    /// Vello scene canvas.
    #[default]
    Vello,
    /// A backend provided outside this crate, identified by name.
    ///
    /// [VelloRenderer](super::renderer::VelloRenderer) refuses these; they are
    /// meant for applications bringing their own [Renderer](super::renderer::Renderer).
    Custom(String),
}

impl Backend {
    /// Parse a backend name.
    ///
    /// Valid values:
    /// - `vello` or an empty string: [Backend::Vello]
    /// - `custom:<name>`: [Backend::Custom]
    ///
    /// Anything else logs a warning and falls back to Vello. Backend names
    /// match case-insensitively; custom names keep their case.
    pub fn parse(val: &str) -> Self {
        const CUSTOM_PREFIX: &str = "custom:";

        let val = val.trim();
        if val.is_empty() || val.eq_ignore_ascii_case("vello") {
            return Backend::Vello;
        }

        let custom_name = val
            .get(..CUSTOM_PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(CUSTOM_PREFIX))
            .map(|_| &val[CUSTOM_PREFIX.len()..]);
        match custom_name {
            Some(name) if !name.is_empty() => {
                log::info!("Using custom renderer backend '{}'", name);
                Backend::Custom(name.to_string())
            },
            _ => {
                log::warn!("Unknown renderer '{}'; falling back to Vello", val);
                Backend::Vello
            },
        }
    }

    /// Read the backend from the `TESSERA_RENDERER` environment variable.
    ///
    /// Defaults to Vello when unset. See [Backend::parse] for values.
    pub fn from_env() -> Self {
        match std::env::var("TESSERA_RENDERER") {
            Ok(val) => Self::parse(&val),
            Err(_) => Backend::default(),
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &str {
        match self {
            Backend::Vello => "vello",
            Backend::Custom(name) => name,
        }
    }
}
