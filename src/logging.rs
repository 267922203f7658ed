//! Tracing setup for hosts embedding the pipeline.

use tracing_subscriber::EnvFilter;

/// How much the processing stages report while a volume runs.
///
/// Stage warnings (the recoverable conditions of the dealiaser and
/// superober) are always let through; the higher settings add stage
/// progress and per-slab detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Drained stage warnings only.
    #[default]
    Warnings,
    /// Plus stage progress: slab counts, gates unfolded, cells emitted.
    Progress,
    /// Plus per-slab and per-write detail.
    Detail,
    /// Everything the crates emit.
    Full,
}

impl Verbosity {
    fn level(self) -> &'static str {
        match self {
            Self::Warnings => "warn",
            Self::Progress => "info",
            Self::Detail => "debug",
            Self::Full => "trace",
        }
    }
}

/// Filter directives covering every workspace crate at the given
/// verbosity, leaving the host's own targets untouched.
fn directives(verbosity: Verbosity) -> String {
    let targets = [
        "boreas",
        "boreas_dealias",
        "boreas_odim",
        "boreas_superob",
        "boreas_volume",
    ];
    let mut filter = String::new();
    for target in targets {
        if !filter.is_empty() {
            filter.push(',');
        }
        filter.push_str(target);
        filter.push('=');
        filter.push_str(verbosity.level());
    }
    filter
}

/// Installs a fmt subscriber filtered to the Boreas crates.
///
/// A `RUST_LOG` environment variable overrides `verbosity` entirely when
/// set, so operators can still cut arbitrary slices of the output.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
