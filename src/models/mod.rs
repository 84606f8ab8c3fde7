use serde::{Deserialize, Serialize};

/// Upload slot for a computational grid.
///
/// The server holds exactly one grid per role at a time. Every upload for a
/// role replaces the previous file under a fixed canonical name; the
/// client-supplied filename is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridRole {
    Source,
    Target,
}

impl GridRole {
    /// Canonical on-disk name for this role inside the uploads directory.
    pub fn canonical_file_name(&self) -> &'static str {
        match self {
            GridRole::Source => "fluid_04.100000_0000.cgns",
            GridRole::Target => "fluid_06.100000_0000.cgns",
        }
    }

    /// Tag passed to the surface conversion, also used to name the artifact.
    pub fn surface_tag(&self) -> &'static str {
        match self {
            GridRole::Source => "src",
            GridRole::Target => "trg",
        }
    }
}

impl std::fmt::Display for GridRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridRole::Source => write!(f, "source"),
            GridRole::Target => write!(f, "target"),
        }
    }
}
