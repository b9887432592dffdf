use crate::utils::bbox::BoundingBox;
use rand::distributions::Uniform;
use rand::prelude::ThreadRng;
use rand::Rng;

/// Generates the boxes of an object that drives up the frame (decreasing y)
///
/// Every step moves the centroid by `speed` rows plus a random drift; the lateral
/// position wanders by up to `lateral_drift` px. The generator ends when the
/// centroid passes `stop_y`.
///
pub struct CrossingGen {
    x: f32,
    y: f32,
    width: i32,
    height: i32,
    speed: f32,
    stop_y: f32,
    gen: ThreadRng,
    dist_speed: Uniform<f32>,
    dist_lateral: Uniform<f32>,
}

impl CrossingGen {
    /// # Parameters
    /// * `cx`, `cy` - initial centroid
    /// * `width`, `height` - box size
    /// * `speed` - rows per frame
    /// * `speed_drift` - maximal deviation of a single step from `speed`
    /// * `lateral_drift` - maximal horizontal shift per step
    /// * `stop_y` - the row after which no boxes are generated
    ///
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cx: f32,
        cy: f32,
        width: i32,
        height: i32,
        speed: f32,
        speed_drift: f32,
        lateral_drift: f32,
        stop_y: f32,
    ) -> Self {
        assert!(speed > speed_drift, "The object must always move forward");
        assert!(width > 0 && height > 0);
        Self {
            x: cx,
            y: cy,
            width,
            height,
            speed,
            stop_y,
            gen: rand::thread_rng(),
            dist_speed: Uniform::new_inclusive(-speed_drift, speed_drift),
            dist_lateral: Uniform::new_inclusive(-lateral_drift, lateral_drift),
        }
    }

    fn bbox(&self) -> BoundingBox {
        let cx = self.x.round() as i32;
        let cy = self.y.round() as i32;
        BoundingBox::new(
            cx - self.width / 2,
            cy - self.height / 2,
            self.width,
            self.height,
        )
    }
}

impl Iterator for CrossingGen {
    type Item = BoundingBox;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y < self.stop_y {
            return None;
        }
        let bbox = self.bbox();

        self.y -= self.speed + self.gen.sample(self.dist_speed);
        self.x += self.gen.sample(self.dist_lateral);

        Some(bbox)
    }
}
