use serde::{Deserialize, Serialize};

/// Geographic regions for ROM releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Japan
    Japan,
    /// USA / North America
    Usa,
    /// Europe (PAL regions)
    Europe,
    /// Australia
    Australia,
    /// Korea
    Korea,
    /// China
    China,
    /// Taiwan / Hong Kong
    Taiwan,
    /// Brazil
    Brazil,
    /// France
    France,
    /// Germany
    Germany,
    /// Spain
    Spain,
    /// Italy
    Italy,
    /// Asia
    Asia,
    /// World / Region-free
    World,
    /// Unknown region
    Unknown,
}

impl Region {
    /// Returns the full name of this region, as written in No-Intro names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Japan => "Japan",
            Self::Usa => "USA",
            Self::Europe => "Europe",
            Self::Australia => "Australia",
            Self::Korea => "Korea",
            Self::China => "China",
            Self::Taiwan => "Taiwan",
            Self::Brazil => "Brazil",
            Self::France => "France",
            Self::Germany => "Germany",
            Self::Spain => "Spain",
            Self::Italy => "Italy",
            Self::Asia => "Asia",
            Self::World => "World",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a region from a No-Intro region string or catalog slug.
    ///
    /// Accepts full names ("USA", "Europe"), common abbreviations ("EUR", "JP")
    /// and the lowercase slugs produced by [`crate::normalize::region_to_slug`].
    /// Anything unrecognized maps to [`Region::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "japan" | "jp" | "jpn" => Self::Japan,
            "usa" | "us" | "united states" => Self::Usa,
            "europe" | "eu" | "eur" => Self::Europe,
            "australia" | "aus" => Self::Australia,
            "korea" | "kor" | "kr" => Self::Korea,
            "china" | "chn" | "cn" => Self::China,
            "taiwan" | "twn" | "tw" | "hong kong" | "hong-kong" | "hk" => Self::Taiwan,
            "brazil" | "bra" | "br" => Self::Brazil,
            "france" | "fra" | "fr" => Self::France,
            "germany" | "ger" | "de" | "deu" => Self::Germany,
            "spain" | "esp" | "es" | "spa" => Self::Spain,
            "italy" | "ita" | "it" => Self::Italy,
            "asia" => Self::Asia,
            "world" | "wld" => Self::World,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
