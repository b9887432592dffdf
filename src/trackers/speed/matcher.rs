use crate::utils::bbox::{centroid_distance, Centroid};
use itertools::Itertools;

/// Live identity → centroid mapping of the identities seen in the last frame
///
/// Matching is greedy: a centroid is compared with the tracked centroids in mapping
/// order and the first one strictly closer than the radius wins, even when a later
/// one is closer. The mapping order is the order in which the identities were
/// emitted during the previous frame, followed by the identities created during the
/// current one.
///
#[derive(Debug, Clone)]
pub struct CentroidMatcher {
    radius: f32,
    live: Vec<(u64, Centroid)>,
}

impl CentroidMatcher {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            live: Vec::default(),
        }
    }

    /// The first tracked identity within the radius
    pub fn find(&self, centroid: &Centroid) -> Option<u64> {
        self.live
            .iter()
            .find(|(_, c)| centroid_distance(c, centroid) < self.radius)
            .map(|(id, _)| *id)
    }

    /// Moves the tracked identity to a new centroid, keeping its position in the mapping
    pub fn refresh(&mut self, id: u64, centroid: Centroid) {
        if let Some((_, c)) = self.live.iter_mut().find(|(i, _)| *i == id) {
            *c = centroid;
        }
    }

    /// Starts tracking the identity at the end of the mapping
    pub fn insert(&mut self, id: u64, centroid: Centroid) {
        self.live.push((id, centroid));
    }

    /// Keeps only the identities emitted during the frame, ordered by first emission
    pub fn retain_emitted(&mut self, emitted: &[u64]) {
        let live = emitted
            .iter()
            .unique()
            .filter_map(|id| {
                self.live
                    .iter()
                    .find(|(i, _)| i == id)
                    .map(|(_, c)| (*id, *c))
            })
            .collect::<Vec<_>>();
        self.live = live;
    }

    pub fn live(&self) -> &[(u64, Centroid)] {
        &self.live
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::trackers::speed::matcher::CentroidMatcher;
    use crate::utils::bbox::Centroid;

    #[test]
    fn first_within_radius_wins() {
        let mut m = CentroidMatcher::new(70.0);
        m.insert(0, Centroid::new(0, 0));
        m.insert(1, Centroid::new(50, 0));

        // closer to 1, but 0 comes first and is within the radius
        assert_eq!(m.find(&Centroid::new(45, 0)), Some(0));
        // out of 0's radius
        assert_eq!(m.find(&Centroid::new(100, 0)), Some(1));
        assert_eq!(m.find(&Centroid::new(200, 0)), None);
    }

    #[test]
    fn radius_is_strict() {
        let mut m = CentroidMatcher::new(70.0);
        m.insert(0, Centroid::new(0, 0));
        assert_eq!(m.find(&Centroid::new(0, 69)), Some(0));
        assert_eq!(m.find(&Centroid::new(0, 70)), None);
    }

    #[test]
    fn refresh_keeps_order() {
        let mut m = CentroidMatcher::new(10.0);
        m.insert(3, Centroid::new(0, 0));
        m.insert(5, Centroid::new(100, 100));
        m.refresh(3, Centroid::new(5, 5));
        assert_eq!(
            m.live(),
            &[(3, Centroid::new(5, 5)), (5, Centroid::new(100, 100))]
        );
    }

    #[test]
    fn retain_emitted() {
        let mut m = CentroidMatcher::new(10.0);
        m.insert(1, Centroid::new(0, 0));
        m.insert(2, Centroid::new(50, 50));
        m.insert(3, Centroid::new(100, 100));
        m.retain_emitted(&[3, 1, 3]);
        assert_eq!(
            m.live(),
            &[(3, Centroid::new(100, 100)), (1, Centroid::new(0, 0))]
        );
        m.retain_emitted(&[]);
        assert!(m.live().is_empty());
    }
}
