// src/joint_names.rs

/// Centralized joint naming and topology for the Shadow Hand.
///
/// Provides the fixed joint vocabulary, the column naming convention and
/// the coupled-joint layout shared by every plot.
pub const WRIST_JOINTS: [&str; 2] = ["WRJ1", "WRJ2"];
pub const FIRST_FINGER_JOINTS: [&str; 4] = ["FFJ1", "FFJ2", "FFJ3", "FFJ4"];
pub const MIDDLE_FINGER_JOINTS: [&str; 4] = ["MFJ1", "MFJ2", "MFJ3", "MFJ4"];
pub const RING_FINGER_JOINTS: [&str; 4] = ["RFJ1", "RFJ2", "RFJ3", "RFJ4"];
pub const LITTLE_FINGER_JOINTS: [&str; 5] = ["LFJ1", "LFJ2", "LFJ3", "LFJ4", "LFJ5"];
pub const THUMB_JOINTS: [&str; 5] = ["THJ1", "THJ2", "THJ3", "THJ4", "THJ5"];

/// Every physical joint, wrist first, in logging order.
pub const ALL_JOINTS: [&str; 24] = [
    "WRJ1", "WRJ2", "FFJ1", "FFJ2", "FFJ3", "FFJ4", "MFJ1", "MFJ2", "MFJ3", "MFJ4", "RFJ1",
    "RFJ2", "RFJ3", "RFJ4", "LFJ1", "LFJ2", "LFJ3", "LFJ4", "LFJ5", "THJ1", "THJ2", "THJ3",
    "THJ4", "THJ5",
];

/// Joints driven by their own actuator.
pub const UNCOUPLED_JOINTS: [&str; 16] = [
    "FFJ3", "FFJ4", "MFJ3", "MFJ4", "RFJ3", "RFJ4", "LFJ3", "LFJ4", "LFJ5", "THJ1", "THJ2",
    "THJ3", "THJ4", "THJ5", "WRJ1", "WRJ2",
];

/// Virtual joints where one actuator drives J1 and J2 of a finger.
pub const COUPLED_JOINTS: [(&str, [&str; 2]); 4] = [
    ("FFJ0", ["FFJ1", "FFJ2"]),
    ("MFJ0", ["MFJ1", "MFJ2"]),
    ("RFJ0", ["RFJ1", "RFJ2"]),
    ("LFJ0", ["LFJ1", "LFJ2"]),
];

pub const TIMESTAMP_COLUMN: &str = "Timestamp";

pub fn cmd_column(joint: &str) -> String {
    format!("cmd_{joint}")
}

pub fn state_column(joint: &str) -> String {
    format!("state_{joint}")
}

/// Returns true if `joint` is one of the known physical or coupled joint codes.
pub fn is_known_joint(joint: &str) -> bool {
    ALL_JOINTS.contains(&joint) || COUPLED_JOINTS.iter().any(|(id, _)| *id == joint)
}

/// One joint in a topology, either read directly or synthesized from a coupled pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyEntry {
    Independent(String),
    Coupled { id: String, joints: [String; 2] },
}

impl TopologyEntry {
    pub fn id(&self) -> &str {
        match self {
            TopologyEntry::Independent(id) => id,
            TopologyEntry::Coupled { id, .. } => id,
        }
    }

    pub fn is_coupled(&self) -> bool {
        matches!(self, TopologyEntry::Coupled { .. })
    }
}

/// Which built-in topology a plot uses when no custom one is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyPreset {
    /// All 24 physical joints as independent series.
    All,
    /// Uncoupled joints followed by the four coupled virtual joints.
    Coupled,
}

/// Declaration-ordered set of joints whose mismatch is computed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JointTopology {
    entries: Vec<TopologyEntry>,
}

impl JointTopology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_preset(preset: TopologyPreset) -> Self {
        match preset {
            TopologyPreset::All => Self::all_joints(),
            TopologyPreset::Coupled => Self::coupled_hand(),
        }
    }

    pub fn all_joints() -> Self {
        let mut topology = Self::new();
        for joint in ALL_JOINTS {
            topology.push_independent(joint);
        }
        topology
    }

    pub fn coupled_hand() -> Self {
        let mut topology = Self::new();
        for joint in UNCOUPLED_JOINTS {
            topology.push_independent(joint);
        }
        for (id, [j1, j2]) in COUPLED_JOINTS {
            topology.push_coupled(id, j1, j2);
        }
        topology
    }

    pub fn push_independent(&mut self, joint: impl Into<String>) -> &mut Self {
        self.entries.push(TopologyEntry::Independent(joint.into()));
        self
    }

    pub fn push_coupled(
        &mut self,
        id: impl Into<String>,
        j1: impl Into<String>,
        j2: impl Into<String>,
    ) -> &mut Self {
        self.entries.push(TopologyEntry::Coupled {
            id: id.into(),
            joints: [j1.into(), j2.into()],
        });
        self
    }

    pub fn entries(&self) -> &[TopologyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_coupled(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.is_coupled() && e.id() == id)
    }
}
