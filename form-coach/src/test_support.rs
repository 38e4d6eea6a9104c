//! Synthetic poses shared by unit tests, integration tests and benches
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.

use crate::geometry::Point;
use crate::pose::{Landmark, LandmarkFrame, LandmarkId, Side, LANDMARK_COUNT};

pub const VIS: f32 = 0.9;

/// Side-on standing athlete, every landmark visible
pub fn standing() -> LandmarkFrame {
    let mut landmarks = [Landmark::new(0.5, 0.1, VIS); LANDMARK_COUNT];
    let mut set = |id: LandmarkId, x: f32, y: f32| landmarks[id.index()] = Landmark::new(x, y, VIS);

    set(LandmarkId::Nose, 0.50, 0.10);
    for (side, dx) in [(Side::Left, 0.02), (Side::Right, -0.02)] {
        set(side.shoulder(), 0.50 + dx, 0.25);
        set(side.elbow(), 0.50 + dx, 0.38);
        set(side.wrist(), 0.50 + dx, 0.50);
        set(side.hip(), 0.50 + dx, 0.50);
        set(side.knee(), 0.50 + dx, 0.70);
        set(side.ankle(), 0.50 + dx, 0.90);
        set(side.heel(), 0.48 + dx, 0.92);
        set(side.foot_index(), 0.56 + dx, 0.92);
    }
    LandmarkFrame::new(landmarks)
}

pub fn set(frame: LandmarkFrame, id: LandmarkId, p: Point) -> LandmarkFrame {
    let vis = frame.visibility(id);
    frame.with(id, Landmark::new(p.x, p.y, vis))
}

pub fn hide(mut frame: LandmarkFrame, ids: &[LandmarkId]) -> LandmarkFrame {
    for &id in ids {
        let lm = frame.get(id);
        frame = frame.with(id, Landmark::new(lm.x, lm.y, 0.0));
    }
    frame
}

/// Move `c` so the angle a-b-c equals `degrees`, keeping |b→c| = `len`
pub fn bend(frame: LandmarkFrame, a: LandmarkId, b: LandmarkId, c: LandmarkId, degrees: f32, len: f32) -> LandmarkFrame {
    let pa = frame.point(a);
    let pb = frame.point(b);
    let (ux, uy) = {
        let dx = pa.x - pb.x;
        let dy = pa.y - pb.y;
        let mag = dx.hypot(dy);
        (dx / mag, dy / mag)
    };
    let (s, co) = degrees.to_radians().sin_cos();
    let dir = (ux * co - uy * s, ux * s + uy * co);
    set(frame, c, Point::new(pb.x + dir.0 * len, pb.y + dir.1 * len))
}

/// Standing pose with both knees bent to `degrees`
pub fn knees_at(degrees: f32) -> LandmarkFrame {
    let mut frame = standing();
    for side in Side::BOTH {
        frame = bend(frame, side.hip(), side.knee(), side.ankle(), degrees, 0.2);
    }
    frame
}

/// Both elbows bent to `degrees`
pub fn elbows_at(frame: LandmarkFrame, degrees: f32) -> LandmarkFrame {
    let mut frame = frame;
    for side in Side::BOTH {
        frame = bend(frame, side.shoulder(), side.elbow(), side.wrist(), degrees, 0.12);
    }
    frame
}

/// Side-on high plank: body horizontal, arms straight under the shoulders
pub fn plank() -> LandmarkFrame {
    let mut frame = standing();
    for side in Side::BOTH {
        for (id, x, y) in [
            (side.shoulder(), 0.30, 0.50),
            (side.elbow(), 0.30, 0.62),
            (side.wrist(), 0.30, 0.74),
            (side.hip(), 0.55, 0.50),
            (side.knee(), 0.72, 0.50),
            (side.ankle(), 0.88, 0.50),
            (side.heel(), 0.90, 0.48),
            (side.foot_index(), 0.90, 0.55),
        ] {
            frame = set(frame, id, Point::new(x, y));
        }
    }
    set(frame, LandmarkId::Nose, Point::new(0.22, 0.52))
}

/// Supine with knees bent, feet flat: shoulder-hip-knee near 165°
pub fn lying() -> LandmarkFrame {
    let mut frame = standing();
    for side in Side::BOTH {
        for (id, x, y) in [
            (side.shoulder(), 0.20, 0.70),
            (side.elbow(), 0.30, 0.72),
            (side.wrist(), 0.40, 0.72),
            (side.hip(), 0.50, 0.70),
            (side.knee(), 0.68, 0.65),
            (side.ankle(), 0.74, 0.73),
            (side.heel(), 0.74, 0.73),
            (side.foot_index(), 0.80, 0.73),
        ] {
            frame = set(frame, id, Point::new(x, y));
        }
    }
    set(frame, LandmarkId::Nose, Point::new(0.12, 0.68))
}

/// Facing the camera, arms down, feet together
pub fn front_standing() -> LandmarkFrame {
    let mut frame = standing();
    // Athlete's left appears on the image right
    for (side, sign) in [(Side::Left, 1.0), (Side::Right, -1.0)] {
        for (id, dx, y) in [
            (side.shoulder(), 0.10, 0.25),
            (side.elbow(), 0.11, 0.38),
            (side.wrist(), 0.12, 0.50),
            (side.hip(), 0.05, 0.50),
            (side.knee(), 0.05, 0.70),
            (side.ankle(), 0.05, 0.90),
            (side.heel(), 0.05, 0.92),
            (side.foot_index(), 0.06, 0.94),
        ] {
            frame = set(frame, id, Point::new(0.5 + sign * dx, y));
        }
    }
    frame
}

/// Translate every landmark
pub fn shift(frame: LandmarkFrame, dx: f32, dy: f32) -> LandmarkFrame {
    LandmarkId::ALL.into_iter().fold(frame, |f, id| {
        let lm = f.get(id);
        f.with(id, Landmark::new(lm.x + dx, lm.y + dy, lm.visibility))
    })
}

/// Flatten a frame into the 132-value buffer the JS side sends
pub fn flat(frame: &LandmarkFrame) -> Vec<f32> {
    frame
        .landmarks()
        .iter()
        .flat_map(|lm| [lm.x, lm.y, lm.z, lm.visibility])
        .collect()
}
