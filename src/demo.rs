//! Circular road example scene.
//!
//! A ring-shaped outer building and a round inner building bound a two-lane
//! circular road with a dashed divider. One car drives counter-clockwise in
//! the inner lane at constant speed.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::geometry::{Entity, Point, Shape};
use crate::schema::{RecorderConfig, SceneFile};

/// Road layout parameters, in meters.
#[derive(Debug, Clone)]
pub struct CircularRoad {
    pub world_size: f64,
    pub inner_building_radius: f64,
    pub num_lanes: u32,
    pub lane_width: f64,
    pub lane_marker_width: f64,
    pub num_lane_markers: u32,
    /// Car speed in m/s.
    pub car_speed: f64,
    /// Seconds per step.
    pub dt: f64,
}

impl Default for CircularRoad {
    fn default() -> Self {
        Self {
            world_size: 120.0,
            inner_building_radius: 30.0,
            num_lanes: 2,
            lane_width: 3.5,
            lane_marker_width: 0.5,
            num_lane_markers: 50,
            car_speed: 3.0,
            dt: 0.1,
        }
    }
}

impl CircularRoad {
    fn center(&self) -> Point {
        Point::new(self.world_size / 2.0, self.world_size / 2.0)
    }

    /// Buildings and lane markings, in draw order.
    pub fn static_entities(&self) -> Vec<Entity> {
        let center = self.center();
        let lanes = self.num_lanes as f64;
        let road_outer = self.inner_building_radius
            + lanes * self.lane_width
            + (lanes - 1.0) * self.lane_marker_width;
        // Far enough out to cover the world's corners.
        let ring_outer = 1.0 + (self.world_size / 2.0) * std::f64::consts::SQRT_2;

        let mut entities = vec![
            Entity::ring(center, road_outer, ring_outer, "gray80"),
            Entity::circle(center, self.inner_building_radius, "gray80"),
        ];

        let n = self.num_lane_markers.max(1);
        for lane in 0..self.num_lanes.saturating_sub(1) {
            let lane = lane as f64;
            let radius = self.inner_building_radius
                + (lane + 1.0) * self.lane_width
                + (lane + 0.5) * self.lane_marker_width;
            // Chord of half the angular spacing, so dashes and gaps alternate.
            let half_step = TAU / (2.0 * n as f64);
            let length = (2.0 * radius * radius * (1.0 - half_step.cos())).sqrt();
            for i in 0..n {
                let theta = TAU * i as f64 / n as f64;
                let pos = center + Point::new(theta.cos(), theta.sin()) * radius;
                entities.push(Entity::new(
                    Shape::oriented_rectangle(pos, Point::new(self.lane_marker_width, length), theta),
                    Some("white"),
                ));
            }
        }
        entities
    }

    /// Radius of the inner lane's centerline.
    fn car_lane_radius(&self) -> f64 {
        self.inner_building_radius + 0.5 * self.lane_width
    }

    /// Car pose after `step` steps.
    pub fn car_at(&self, step: u32) -> Entity {
        let radius = self.car_lane_radius();
        let theta = self.car_speed * self.dt * step as f64 / radius;
        let pos = self.center() + Point::new(theta.cos(), theta.sin()) * radius;
        Entity::new(
            Shape::oriented_rectangle(pos, Point::new(4.0, 2.0), theta + FRAC_PI_2),
            Some("red"),
        )
    }

    /// Full scene for `steps` steps at `ppm` pixels per meter.
    pub fn scene(&self, steps: u32, ppm: u32) -> SceneFile {
        let config = RecorderConfig::new(self.world_size, self.world_size, ppm);
        SceneFile {
            config,
            fps: (1.0 / self.dt).round().max(1.0) as u32,
            background_entities: self.static_entities(),
            steps: (0..steps).map(|k| vec![self.car_at(k)]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::FrameRecorder;

    #[test]
    fn test_static_layout() {
        let road = CircularRoad::default();
        let entities = road.static_entities();
        // Ring, inner building, one divider of 50 dashes.
        assert_eq!(entities.len(), 52);
        let Shape::Ring {
            inner_radius,
            outer_radius,
            ..
        } = entities[0].shape
        else {
            panic!("first entity should be the ring building");
        };
        assert!((inner_radius - 37.5).abs() < 1e-9);
        assert!(outer_radius > 85.0);
    }

    #[test]
    fn test_car_starts_in_inner_lane() {
        let road = CircularRoad::default();
        let Shape::Rectangle { corners } = road.car_at(0).shape else {
            panic!("car should be a rectangle");
        };
        let cx = corners.iter().map(|c| c.x).sum::<f64>() / 4.0;
        let cy = corners.iter().map(|c| c.y).sum::<f64>() / 4.0;
        assert!((cx - 91.75).abs() < 1e-9);
        assert!((cy - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_scene_renders() {
        let scene = CircularRoad::default().scene(2, 1);
        assert_eq!(scene.fps, 10);
        let mut recorder = FrameRecorder::new(scene.config.clone()).unwrap();
        recorder.create_window("gray");
        for k in 0..scene.steps.len() {
            recorder.update_agents(&scene.step_entities(k).unwrap()).unwrap();
        }
        assert_eq!(recorder.frame_count(), 2);
        let frame = &recorder.frames()[0];
        assert_eq!(frame.dimensions(), (120, 120));
        // World center sits inside the inner building.
        assert_eq!(frame.pixel(60, 60), [204, 204, 204]);
        // Road surface between the buildings shows the background.
        assert_eq!(frame.pixel(28, 60), [128, 128, 128]);
        // The car starts at (91.75, 60), heading north.
        assert_eq!(frame.pixel(92, 60), [255, 0, 0]);
    }
}
