use chrono::{Duration, NaiveDateTime};
use std::fmt;

/// Timestamp layout of the trajectory text values (`2020-01-01 00:00:00`).
pub const TRAJECTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Declares a categorical column of the AIS export. Known labels map to
/// unit variants, anything else is kept verbatim in `Unlisted`, so
/// `label()` always gives back the text that was read.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
        #[serde(from = "String")]
        pub enum $name {
            $($variant,)+
            Unlisted(String),
        }

        impl $name {
            pub fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unlisted(label) => label,
                }
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                match label.as_str() {
                    $($label => $name::$variant,)+
                    _ => $name::Unlisted(label),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    NavigationalStatus {
        Unknown => "Unknown value",
        Under => "Under way using engine",
        Engaged => "Engaged in fishing",
        Moored => "Moored",
        Anchor => "At anchor",
        Restricted => "Restricted maneuverability",
        Constrained => "Constrained by her draught",
        Not => "Not under command",
        Sailing => "Under way sailing",
        Aground => "Aground",
        TowingAstern => "Power-driven vessel towing astern",
        PushingAhead => "Power-driven vessel pushing ahead or towing alongside",
        ReservedHsc => "Reserved for future amendment [HSC]",
        ReservedWig => "Reserved for future amendment [WIG]",
        SartActive => "AIS-SART is active",
    }
}

labelled_enum! {
    ShipType {
        Tanker => "Tanker",
        Cargo => "Cargo",
        Fishing => "Fishing",
        Passenger => "Passenger",
        Sailing => "Sailing",
        SAR => "SAR",
        Pleasure => "Pleasure",
        Reserved => "Reserved",
        Tug => "Tug",
        WIG => "WIG",
        Medical => "Medical",
        AntiPollution => "Anti-pollution",
        Other => "Other",
        Towing => "Towing",
        TowingLongWide => "Towing long/wide",
        Pilot => "Pilot",
        Dredging => "Dredging",
        Military => "Military",
        HSC => "HSC",
        Law => "Law enforcement",
        Port => "Port tender",
        Diving => "Diving",
        Spare1 => "Spare 1",
        Spare2 => "Spare 2",
        NotPartyToConflict => "Not party to conflict",
        Undefined => "Undefined",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum DataSource {
    AIS,
}

#[derive(Debug, serde::Deserialize)]
//1.	Timestamp			Timestamp from the AIS basestation, format: 31/12/2015 23:59:59
//2.	Type of mobile			Describes what type of target this message is received from (class A AIS Vessel, Class B AIS vessel, etc)
//3.	MMSI				MMSI number of vessel
//4.	Latitude			Latitude of message report (e.g. 57,8794)
//5.	Longitude			Longitude of message report (e.g. 17,9125)
//6.	Navigational status		Navigational status from AIS message if available, e.g.: 'Engaged in fishing', 'Under way using engine', mv.
//7.	ROT				Rot of turn from AIS message if available
//8.	SOG				Speed over ground from AIS message if available
//9.	COG				Course over ground from AIS message if available
//10.	Heading			Heading from AIS message if available
//11.	IMO				IMO number of the vessel
//12.	Callsign			Callsign of the vessel
//13.	Name				Name of the vessel
//14.	Ship type			Describes the AIS ship type of this vessel
//15.	Cargo type			Type of cargo from the AIS message
//16.	Width				Width of the vessel
//17.	Length				Lenght of the vessel
//18.	Type of position fixing device	Type of positional fixing device from the AIS message
//19.	Draught			Draugth field from AIS message
//20.	Destination			Destination from AIS message
//21.	ETA				Estimated Time of Arrival, if available
//22.	Data source type		Data source type, e.g. AIS
//23. Size A				Length from GPS to the bow
//24. Size B				Length from GPS to the stern
//25. Size C				Length from GPS to starboard side
//26. Size D				Length from GPS to port side
// example: 23/06/2017 00:00:00,Base Station,2194005,56.344267,4.272000,Unknown value,,,,,Unknown,,,Undefined,,,,Surveyed,,,,AIS,,,,
// 325315:23/06/2017 00:44:23,Class A,305484000,56.134323,11.474578,Under way using engine,0.0,6.8,268.1,264,9428217,V2EN3,ICE MOON,Cargo,,24,129,GPS,6.8,AARHUS,23/06/2017 08:00:00,AIS,109,20,12,12
pub struct Record {
    pub timestamp: String,
    pub type_mobile: Option<String>,
    pub mmsi: u32,
    pub lat: f64,
    pub lon: f64,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub status: Option<NavigationalStatus>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub rot: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub sog: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub cog: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub heading: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub imo: Option<u32>,
    pub callsign: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub ship_type: Option<ShipType>,
    pub cargo_type: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub width: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub length: Option<f64>,
    pub type_device: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub draught: Option<f64>,
    pub destination: Option<String>,
    pub eta: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub data_source: Option<DataSource>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub a: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub b: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub c: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub d: Option<f64>,
}

/// Planar position in metres of the metric projection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One cleaned position report of a single vessel.
///
/// `speed` starts as the self-reported speed over ground and is overwritten
/// with the assumed speed once the outlier filter has classified the point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AisPoint {
    pub mmsi: u32,
    pub timestamp: NaiveDateTime,
    pub longitude: f64,
    pub latitude: f64,
    pub position: Position,
    pub speed: Option<f64>,
    pub rot: Option<f64>,
    pub heading: Option<f64>,
    pub draught: Option<f64>,
    pub navigational_status: Option<NavigationalStatus>,
    pub destination: Option<String>,
    pub eta: Option<NaiveDateTime>,
    pub imo: Option<u32>,
    pub name: Option<String>,
    pub callsign: Option<String>,
    pub mobile_type: Option<String>,
    pub position_fixing_device: Option<String>,
    pub ship_type: Option<ShipType>,
    pub data_source: Option<DataSource>,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub d: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub timestamp: NaiveDateTime,
    pub longitude: f64,
    pub latitude: f64,
}

/// Spatiotemporal trajectory value of a span, in lon/lat (SRID 4326).
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryGeometry {
    pub points: Vec<TrajectoryPoint>,
}

impl fmt::Display for TrajectoryGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(
                f,
                "POINT({} {})@{}",
                p.longitude,
                p.latitude,
                p.timestamp.format(TRAJECTORY_TIMESTAMP_FORMAT)
            )?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalInstant {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

/// Stepwise temporal float, both bounds inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalSequence {
    pub instants: Vec<TemporalInstant>,
}

impl TemporalSequence {
    /// Value in effect at the end of the sequence.
    pub fn last_value(&self) -> Option<f64> {
        self.instants.last().and_then(|i| i.value)
    }
}

impl fmt::Display for TemporalSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interp=Stepwise;[")?;
        for (i, instant) in self.instants.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match instant.value {
                Some(v) => write!(f, "{v}")?,
                None => write!(f, "NULL")?,
            }
            write!(f, "@{}", instant.timestamp.format(TRAJECTORY_TIMESTAMP_FORMAT))?;
        }
        write!(f, "]")
    }
}

/// Static ship attributes, resolved over the whole vessel history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipAttributes {
    pub imo: Option<u32>,
    pub name: Option<String>,
    pub callsign: Option<String>,
    pub mobile_type: Option<String>,
    pub position_fixing_device: Option<String>,
    pub ship_type: Option<ShipType>,
    pub data_source: Option<DataSource>,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub d: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryRecord {
    pub mmsi: u32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration: Duration,
    pub inferred_stopped: bool,
    pub trajectory: TrajectoryGeometry,
    pub rot: Option<TemporalSequence>,
    pub heading: Option<TemporalSequence>,
    pub draught: Option<TemporalSequence>,
    pub navigational_status: Option<NavigationalStatus>,
    pub destination: Option<String>,
    pub eta: Option<NaiveDateTime>,
    pub ship: ShipAttributes,
}

impl TrajectoryRecord {
    pub fn point_count(&self) -> usize {
        self.trajectory.points.len()
    }

    /// Draught in effect at the end of the span.
    pub fn draught_value(&self) -> Option<f64> {
        self.draught.as_ref().and_then(TemporalSequence::last_value)
    }
}
