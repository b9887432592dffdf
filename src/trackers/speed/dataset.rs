/// Final speed of an identity
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedRecord {
    /// identity of the object
    pub id: u64,
    /// speed, px/s
    pub speed: i64,
}

/// Speed records in capture order
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<SpeedRecord>,
    exceeded: usize,
}

impl Dataset {
    pub(crate) fn push(&mut self, record: SpeedRecord, speed_limit: i64) {
        if record.speed > speed_limit {
            self.exceeded += 1;
        }
        self.records.push(record);
    }

    pub fn records(&self) -> &[SpeedRecord] {
        &self.records
    }

    /// Number of records with speed above the limit
    pub fn exceeded(&self) -> usize {
        self.exceeded
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn speeds(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.speed).collect()
    }

    /// Identities and speeds as parallel lists
    pub fn export(&self) -> (Vec<u64>, Vec<i64>) {
        self.records.iter().map(|r| (r.id, r.speed)).unzip()
    }
}

#[cfg(test)]
mod tests {
    use crate::trackers::speed::dataset::{Dataset, SpeedRecord};

    #[test]
    fn capture_order_and_exceeded() {
        let mut ds = Dataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.export(), (vec![], vec![]));

        ds.push(SpeedRecord { id: 7, speed: 120 }, 150);
        ds.push(SpeedRecord { id: 2, speed: 151 }, 150);
        ds.push(SpeedRecord { id: 5, speed: 150 }, 150);

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.exceeded(), 1);
        assert_eq!(ds.export(), (vec![7, 2, 5], vec![120, 151, 150]));
        assert_eq!(ds.ids(), vec![7, 2, 5]);
        assert_eq!(ds.speeds(), vec![120, 151, 150]);
    }
}
