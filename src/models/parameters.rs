use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Angular extent of the imagery window around the target point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum ZoomLevel {
    #[serde(rename = "City-Wide (0.025°)")]
    CityWide,
    #[serde(rename = "Block-Level (0.01°)")]
    BlockLevel,
    #[serde(rename = "Zoomed-In (0.005°)")]
    ZoomedIn,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 3] = [Self::CityWide, Self::BlockLevel, Self::ZoomedIn];

    pub fn span_degrees(self) -> f64 {
        match self {
            Self::CityWide => 0.025,
            Self::BlockLevel => 0.01,
            Self::ZoomedIn => 0.005,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CityWide => "City-Wide",
            Self::BlockLevel => "Block-Level",
            Self::ZoomedIn => "Zoomed-In",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CityWide => "City-Wide (0.025°)",
            Self::BlockLevel => "Block-Level (0.01°)",
            Self::ZoomedIn => "Zoomed-In (0.005°)",
        }
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::CityWide
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ZoomLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|z| s.eq_ignore_ascii_case(z.label()) || s.eq_ignore_ascii_case(z.name()))
            .ok_or_else(|| {
                format!(
                    "Invalid zoom_level '{s}'. Valid values: {}",
                    Self::ALL.map(Self::label).join(", ")
                )
            })
    }
}

/// Ground sample distance of the requested imagery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum Resolution {
    #[serde(rename = "Coarse (10m)")]
    Coarse,
    #[serde(rename = "Standard (5m)")]
    Standard,
    #[serde(rename = "Fine (2.5m)")]
    Fine,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Self::Coarse, Self::Standard, Self::Fine];

    pub fn meters_per_pixel(self) -> f64 {
        match self {
            Self::Coarse => 10.0,
            Self::Standard => 5.0,
            Self::Fine => 2.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Coarse => "Coarse",
            Self::Standard => "Standard",
            Self::Fine => "Fine",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Coarse => "Coarse (10m)",
            Self::Standard => "Standard (5m)",
            Self::Fine => "Fine (2.5m)",
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::Standard
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| s.eq_ignore_ascii_case(r.label()) || s.eq_ignore_ascii_case(r.name()))
            .ok_or_else(|| {
                format!(
                    "Invalid resolution '{s}'. Valid values: {}",
                    Self::ALL.map(Self::label).join(", ")
                )
            })
    }
}

/// The three rasters the engine hands back for every completed analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Before,
    After,
    Overlay,
}

impl FromStr for ImageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "overlay" => Ok(Self::Overlay),
            _ => Err(format!(
                "Invalid image type '{s}'. Valid values: before, after, overlay"
            )),
        }
    }
}

impl ImageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Overlay => "overlay",
        }
    }
}
