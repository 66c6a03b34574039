//! Drive session statistics
//!
//! Counters accumulated while the vehicle is in drive mode. They are
//! reset whenever a new drive session starts.

/// Progress of the current drive session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriveStats {
    /// Seconds spent in drive mode
    pub time: f64,

    /// Distance actually travelled (blocked steps add nothing)
    pub distance: f64,

    /// Steps rejected by a static obstacle
    pub obstacle_bumps: usize,

    /// Ticks on which the vehicle overlapped a traffic agent
    pub traffic_hits: usize,

    /// Waypoints reached
    pub arrivals: usize,

    /// Highest absolute speed seen
    pub peak_speed: f64,
}

impl DriveStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one drive tick
    pub fn record_step(&mut self, delta_secs: f64, travelled: f64, speed: f64) {
        self.time += delta_secs;
        self.distance += travelled;
        self.peak_speed = self.peak_speed.max(speed.abs());
    }

    pub fn record_bump(&mut self) {
        self.obstacle_bumps += 1;
    }

    pub fn record_traffic_hit(&mut self) {
        self.traffic_hits += 1;
    }

    pub fn record_arrival(&mut self) {
        self.arrivals += 1;
    }

    /// Average speed over the session, 0 before any time has passed
    pub fn average_speed(&self) -> f64 {
        if self.time > 0.0 {
            self.distance / self.time
        } else {
            0.0
        }
    }
}
