use serde::{Deserialize, Serialize};

/// One (part, destination) combination produced by expanding the assembly matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartTargetPair {
    pub part: String,
    pub destination: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferKind {
    Part,
    Diluent,
    Spot,
}

/// A single planned droplet transfer, volume in nanoliters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub source_well: String,
    pub destination: String,
    pub volume_nl: u32,
    pub kind: TransferKind,
}

impl TransferRecord {
    pub fn part(
        source_well: impl Into<String>,
        destination: impl Into<String>,
        volume_nl: u32,
    ) -> Self {
        Self {
            source_well: source_well.into(),
            destination: destination.into(),
            volume_nl,
            kind: TransferKind::Part,
        }
    }

    pub fn diluent(
        source_well: impl Into<String>,
        destination: impl Into<String>,
        volume_nl: u32,
    ) -> Self {
        Self {
            source_well: source_well.into(),
            destination: destination.into(),
            volume_nl,
            kind: TransferKind::Diluent,
        }
    }
}

/// Ordered transfers for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPlan {
    records: Vec<TransferRecord>,
}

impl TransferPlan {
    pub fn new(records: Vec<TransferRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TransferRecord] {
        &self.records
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = TransferRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Labware identity written into every pick-list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateMetadata {
    pub source_plate_name: String,
    pub source_plate_type: String,
    pub destination_plate_name: String,
}

impl Default for PlateMetadata {
    fn default() -> Self {
        Self {
            source_plate_name: "Source[1]".to_string(),
            source_plate_type: "384PP_AQ_BP".to_string(),
            destination_plate_name: "Destination[1]".to_string(),
        }
    }
}

/// A row of the device's plate-reformat pick list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickListRow {
    #[serde(rename = "Source Plate Name", default)]
    pub source_plate_name: String,
    #[serde(rename = "Source Plate Type", default)]
    pub source_plate_type: String,
    #[serde(rename = "Source Well")]
    pub source_well: String,
    #[serde(rename = "Sample ID", default)]
    pub sample_id: String,
    #[serde(rename = "Sample Name", default)]
    pub sample_name: String,
    #[serde(rename = "Sample Group", default)]
    pub sample_group: String,
    #[serde(rename = "Sample Comment", default)]
    pub sample_comment: String,
    #[serde(rename = "Destination Plate Name", default)]
    pub destination_plate_name: String,
    #[serde(rename = "Destination Well")]
    pub destination_well: String,
    #[serde(rename = "Transfer Volume")]
    pub transfer_volume_nl: u32,
}

/// The emitted pick list, in transfer order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickList {
    rows: Vec<PickListRow>,
}

impl PickList {
    pub fn new(rows: Vec<PickListRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[PickListRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
