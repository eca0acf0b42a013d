use serde::Deserialize;

/// Raw DataPoint response document, `SiteRep.DV.Location[].Period[].Rep[]`.
///
/// Every leaf field arrives as a string; numeric coercion happens during
/// shaping. Only the fields retained downstream are modeled — serde ignores
/// the rest of the payload. The document is ephemeral: consumed by the
/// shaper, never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteRepDocument {
    #[serde(rename = "SiteRep")]
    pub site_rep: SiteRep,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteRep {
    #[serde(rename = "DV")]
    pub dv: DataValues,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataValues {
    #[serde(rename = "Location", default)]
    pub locations: Vec<RawLocation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    pub i: String,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "Period", default)]
    pub periods: Vec<RawPeriod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPeriod {
    #[serde(rename = "Rep", default)]
    pub reps: Vec<RawRep>,
}

/// One keyed reading. `T` is temperature, `H` screen relative humidity;
/// the other keyed fields are dropped at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRep {
    #[serde(rename = "T", default)]
    pub temperature: Option<String>,
    #[serde(rename = "H", default)]
    pub humidity: Option<String>,
}
