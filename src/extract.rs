//! Record extraction from parsed Ranger Explorer measurement documents
//!
//! Walks the attribute tree and flattens it into the column model of
//! [`crate::table`]. Extraction never fails on missing data: an absent
//! measurement simply yields an empty sequence, and tabulation downstream
//! decides whether the document is still rectangular.

use roxmltree::{Document, Node};

use crate::table::ColumnSet;

/// The measurement kinds carried per test point
///
/// Numeric kinds carry a unit in their column name; categorical kinds
/// (status and the two bit-error rates) do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Power,
    Status,
    CarrierToNoise,
    Offset,
    ModulationErrorRatio,
    CodedBer,
    ViterbiBer,
    LevelMargin,
}

/// The seven kinds resolved by global tag lookup alongside power
const MEASUREMENTS: [Measure; 7] = [
    Measure::Status,
    Measure::CarrierToNoise,
    Measure::Offset,
    Measure::ModulationErrorRatio,
    Measure::CodedBer,
    Measure::ViterbiBer,
    Measure::LevelMargin,
];

impl Measure {
    /// Element tag (and column label) used by the meter
    pub fn tag(&self) -> &'static str {
        match self {
            Measure::Power => "POWER",
            Measure::Status => "STATUS",
            Measure::CarrierToNoise => "CN",
            Measure::Offset => "OFFSET",
            Measure::ModulationErrorRatio => "MER",
            Measure::CodedBer => "CBER",
            Measure::ViterbiBer => "VBER",
            Measure::LevelMargin => "LM",
        }
    }

    /// Unit suffix for numeric measures; categorical measures have none
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Measure::Power => Some("dBuV"),
            Measure::CarrierToNoise => Some("dB"),
            Measure::Offset => Some("kHZ"),
            Measure::ModulationErrorRatio => Some("dB"),
            Measure::LevelMargin => Some("dB"),
            Measure::Status | Measure::CodedBer | Measure::ViterbiBer => None,
        }
    }

    /// Deterministic column name, e.g. `CH15 - POWER (dBuV)` or `CH15 - STATUS`
    pub fn column_name(&self, channel: &str) -> String {
        match self.unit() {
            Some(unit) => format!("{} - {} ({})", channel, self.tag(), unit),
            None => format!("{} - {}", channel, self.tag()),
        }
    }
}

/// Flatten a parsed document into its insertion-ordered column set
///
/// Column order is the observable CSV header order: test-point info, GPS
/// coordinates, then per-channel measures in channel-list order.
pub fn extract_document(doc: &Document) -> ColumnSet {
    let mut columns = ColumnSet::new();

    columns.push("TEST POINT", cpoint_attribute(doc, "id"));
    columns.push("DATE (YYYY-MM-DD)", cpoint_attribute(doc, "date"));
    columns.push("TIME (HH:MM:SS)", cpoint_attribute(doc, "time"));

    columns.push("LATITUDE", gps_coordinate(doc, "latitude"));
    columns.push("LONGITUDE", gps_coordinate(doc, "longitude"));

    let channels = channel_list(doc);
    let Some(main) = channels.first() else {
        return columns;
    };

    if channels.len() > 1 {
        // Multi-channel: power must be scoped to its CHANNEL-SET entry;
        // the remaining measures only exist for the main channel.
        columns.push(
            Measure::Power.column_name(main),
            channel_power(doc, channel_name(main)),
        );
        for measure in MEASUREMENTS {
            columns.push(measure.column_name(main), measure_values(doc, measure));
        }
        for channel in &channels[1..] {
            columns.push(
                Measure::Power.column_name(channel),
                channel_power(doc, channel_name(channel)),
            );
        }
    } else {
        // Single-channel documents have unambiguous global measurement tags
        columns.push(
            Measure::Power.column_name(main),
            measure_values(doc, Measure::Power),
        );
        for measure in MEASUREMENTS {
            columns.push(measure.column_name(main), measure_values(doc, measure));
        }
    }

    columns
}

/// Channel labels in document order, e.g. `["CH15", "CH18"]`
///
/// Multi-channel documents enumerate the children of the first CHANNEL-SET;
/// otherwise the lone CHANNEL node names the implicit single channel.
fn channel_list(doc: &Document) -> Vec<String> {
    if let Some(set) = doc
        .descendants()
        .find(|n| n.has_tag_name("CHANNEL-SET"))
    {
        set.children()
            .filter(|n| n.has_tag_name("CHANNEL"))
            .filter_map(|n| n.attribute("name"))
            .map(|name| format!("CH{name}"))
            .collect()
    } else {
        doc.descendants()
            .find(|n| n.has_tag_name("CHANNEL"))
            .and_then(|n| n.attribute("name"))
            .map(|name| vec![format!("CH{name}")])
            .unwrap_or_default()
    }
}

/// Strip the `CH` label prefix back to the meter's channel name
fn channel_name(label: &str) -> &str {
    label.strip_prefix("CH").unwrap_or(label)
}

fn cpoint_attribute(doc: &Document, attribute: &str) -> Vec<String> {
    doc.descendants()
        .filter(|n| n.has_tag_name("CPOINT"))
        .filter_map(|n| n.attribute(attribute).map(str::to_string))
        .collect()
}

fn gps_coordinate(doc: &Document, coordinate: &str) -> Vec<String> {
    doc.descendants()
        .filter(|n| n.has_tag_name("GPS"))
        .filter_map(|n| n.attribute(coordinate).map(str::to_string))
        .collect()
}

/// Power readings for one channel, in test-point order
///
/// Only CHANNEL nodes directly under a CHANNEL-SET count: the same tag can
/// appear nested elsewhere and must not contribute readings.
fn channel_power(doc: &Document, name: &str) -> Vec<String> {
    doc.descendants()
        .filter(|n| {
            n.has_tag_name("CHANNEL")
                && n.attribute("name") == Some(name)
                && n.parent().is_some_and(|p| p.has_tag_name("CHANNEL-SET"))
        })
        .filter_map(|n| first_power_value(&n))
        .collect()
}

fn first_power_value(channel: &Node) -> Option<String> {
    channel
        .descendants()
        .find(|n| n.has_tag_name("POWER"))
        .and_then(|n| n.attribute("value"))
        .map(str::to_string)
}

fn measure_values(doc: &Document, measure: Measure) -> Vec<String> {
    doc.descendants()
        .filter(|n| n.has_tag_name(measure.tag()))
        .filter_map(|n| n.attribute("value").map(str::to_string))
        .collect()
}
