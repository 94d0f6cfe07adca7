use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// GroupSlot – a label/colour pair waiting to be filled
// ---------------------------------------------------------------------------

/// One position in the ordered label → colour mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSlot {
    pub label: String,
    pub color: RGBColor,
}

// ---------------------------------------------------------------------------
// Group – a contiguous run of samples
// ---------------------------------------------------------------------------

/// A contiguous block of samples taken from the input by line index.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: String,
    pub color: RGBColor,
    /// Samples in input order.
    pub values: Vec<f64>,
}

impl Group {
    pub fn from_slot(slot: &GroupSlot, capacity: usize) -> Self {
        Group {
            label: slot.label.clone(),
            color: slot.color,
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean, or `None` for an empty group.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Output file name for this group's chart.
    pub fn file_name(&self) -> String {
        format!("graph_{}.png", self.label)
    }
}

// ---------------------------------------------------------------------------
// PartitionedSamples – the loader's result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PartitionedSamples {
    /// Groups in slot order; trailing groups may be short or empty.
    pub groups: Vec<Group>,
    /// Total number of lines consumed from the input.
    pub lines_read: usize,
    /// Lines past the last group that were read but not stored.
    pub discarded: usize,
}

impl PartitionedSamples {
    /// Number of samples stored across all groups.
    pub fn stored(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn group(values: &[f64]) -> Group {
        Group {
            label: "A".into(),
            color: RGBColor(255, 0, 0),
            values: values.to_vec(),
        }
    }

    #[test]
    fn mean_of_small_group() {
        assert_eq!(group(&[1.0, 2.0, 3.0]).mean(), Some(2.0));
        assert_eq!(group(&[0.5]).mean(), Some(0.5));
    }

    #[test]
    fn empty_group_has_no_mean() {
        let g = group(&[]);
        assert!(g.is_empty());
        assert_eq!(g.mean(), None);
    }

    #[test]
    fn file_name_encodes_label() {
        assert_eq!(group(&[]).file_name(), "graph_A.png");
    }
}
