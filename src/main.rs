use rand::Rng;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use waypoint_horizon::math::Point3d;
use waypoint_horizon::{Engine, HorizonConfig, PathPoint, Pose};

fn main() {
    let engine = Arc::new(Engine::new(HorizonConfig::default()));

    // Synthetic route: 2 km of gently wandering path at 1 m spacing.
    let mut rng = rand::thread_rng();
    let mut y = 0.0;
    let points = (0..2000)
        .map(|i| {
            y += rng.gen_range(-0.2..0.2);
            PathPoint::new(Point3d::new(i as f64, y, 0.0), 13.89)
        })
        .collect::<Vec<_>>();
    let path = points.clone();
    engine.set_global_path("map", points);

    // A red light 1.5 km down the route.
    engine.set_stop_line(1500);

    // Pose feed: drive along the route at 10 m/s, updated at 100 Hz.
    {
        let engine = engine.clone();
        thread::spawn(move || {
            let start = Instant::now();
            loop {
                let dist = 10.0 * start.elapsed().as_secs_f64();
                let idx = usize::min(dist as usize, path.len() - 1);
                engine.update_pose(Pose::new(path[idx].position, 0.0));
                thread::sleep(Duration::from_millis(10));
            }
        });
    }

    let interval = engine.tick_interval();
    loop {
        let tick_start = Instant::now();
        if let Some(horizon) = engine.tick() {
            if let Some(first) = horizon.points.first() {
                println!(
                    "idx {:>4} | {:>3} pts | lead speed {:>5.2} m/s | tick {:?}",
                    horizon.start_index,
                    horizon.points.len(),
                    first.speed,
                    tick_start.elapsed(),
                );
            }
        }
        thread::sleep(interval.saturating_sub(tick_start.elapsed()));
    }
}
