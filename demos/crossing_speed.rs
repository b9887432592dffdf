use crossing_speed::examples::CrossingGen;
use crossing_speed::prelude::{FrameRateClock, SpeedTracker, SpeedTrackerOptions};

fn main() {
    env_logger::init();

    let opts = SpeedTrackerOptions::default().speed_limit(250);
    let mut tracker = SpeedTracker::with_clock(opts, FrameRateClock::new(30.0));

    let mut lanes = vec![
        CrossingGen::new(120.0, 620.0, 60, 40, 6.0, 1.0, 1.0, 80.0),
        CrossingGen::new(360.0, 650.0, 50, 36, 9.0, 2.0, 1.0, 80.0),
        CrossingGen::new(600.0, 700.0, 70, 44, 12.0, 3.0, 1.5, 80.0),
    ];

    loop {
        let detections = lanes.iter_mut().filter_map(|g| g.next()).collect::<Vec<_>>();
        if detections.is_empty() {
            break;
        }

        let report = tracker.step(&detections).unwrap();
        for o in report.observations {
            if let Some(rec) = o.captured {
                eprintln!(
                    "Frame {}: identity {} captured at {} px/s{}",
                    tracker.clock().frame(),
                    rec.id,
                    rec.speed,
                    if o.over_limit { " (over the limit)" } else { "" }
                );
            }
        }
    }

    let dataset = tracker.finish();
    eprintln!("Identities: {:?}", dataset.ids());
    eprintln!("Speeds: {:?}", dataset.speeds());
    eprintln!("Above the limit: {}", dataset.exceeded());
    println!("{}", tracker.chart().unwrap());
}
