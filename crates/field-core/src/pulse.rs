//! Fixed pool of traveling pulse markers.
//!
//! Markers are never allocated or freed after construction: a request claims
//! the first idle slot, and a marker that reaches the end of its connection
//! goes back to idle.

use rand::Rng;

/// Index of a connection in the owning scene.
pub type ConnectionId = usize;
pub type MarkerId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerState {
    Idle,
    Active {
        connection: ConnectionId,
        /// Position along the connection in [0, 1).
        progress: f32,
    },
}

#[derive(Clone, Debug)]
pub struct PulseMarker {
    pub state: MarkerState,
    /// Progress added per tick.
    pub speed: f32,
}

impl PulseMarker {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.state, MarkerState::Active { .. })
    }
}

#[derive(Clone, Debug)]
pub struct PulsePool {
    markers: Vec<PulseMarker>,
}

impl PulsePool {
    pub fn new<R: Rng + ?Sized>(size: usize, speed: (f32, f32), rng: &mut R) -> Self {
        let markers = (0..size)
            .map(|_| PulseMarker {
                state: MarkerState::Idle,
                speed: sample(rng, speed),
            })
            .collect();
        Self { markers }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.markers.len()
    }

    pub fn active_count(&self) -> usize {
        self.markers.iter().filter(|m| m.is_active()).count()
    }

    #[inline]
    pub fn markers(&self) -> &[PulseMarker] {
        &self.markers
    }

    /// Start a marker at the beginning of `connection`.
    ///
    /// Returns `None` when every marker is busy; the request is dropped.
    pub fn request(&mut self, connection: ConnectionId) -> Option<MarkerId> {
        let (id, marker) = self
            .markers
            .iter_mut()
            .enumerate()
            .find(|(_, m)| !m.is_active())?;
        marker.state = MarkerState::Active {
            connection,
            progress: 0.0,
        };
        Some(id)
    }

    /// Move every active marker forward one tick. Returns how many finished.
    pub fn advance(&mut self) -> usize {
        let mut finished = 0;
        for marker in &mut self.markers {
            if let MarkerState::Active {
                connection,
                progress,
            } = marker.state
            {
                let next = progress + marker.speed;
                marker.state = if next >= 1.0 {
                    finished += 1;
                    MarkerState::Idle
                } else {
                    MarkerState::Active {
                        connection,
                        progress: next,
                    }
                };
            }
        }
        finished
    }

    /// `(connection, progress)` for every visible marker.
    pub fn active(&self) -> impl Iterator<Item = (ConnectionId, f32)> + '_ {
        self.markers.iter().filter_map(|m| match m.state {
            MarkerState::Active {
                connection,
                progress,
            } => Some((connection, progress)),
            MarkerState::Idle => None,
        })
    }
}

/// Uniform sample from an inclusive-exclusive `(min, max)` pair; degenerate
/// pairs return `min`.
pub(crate) fn sample<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(size: usize, speed: f32) -> PulsePool {
        let mut rng = StdRng::seed_from_u64(7);
        PulsePool::new(size, (speed, speed), &mut rng)
    }

    #[test]
    fn requests_beyond_capacity_are_dropped() {
        let mut p = pool(3, 0.1);
        assert_eq!(p.request(10), Some(0));
        assert_eq!(p.request(11), Some(1));
        assert_eq!(p.request(12), Some(2));
        assert_eq!(p.request(13), None);
        assert_eq!(p.active_count(), 3);
        let conns: Vec<_> = p.active().map(|(c, _)| c).collect();
        assert_eq!(conns, vec![10, 11, 12]);
    }

    #[test]
    fn finished_markers_return_to_the_pool() {
        let mut p = pool(1, 0.25);
        p.request(4);
        assert_eq!(p.advance(), 0);
        assert_eq!(p.advance(), 0);
        assert_eq!(p.advance(), 0);
        assert_eq!(p.active_count(), 1);
        assert_eq!(p.advance(), 1);
        assert_eq!(p.active_count(), 0);
        assert_eq!(p.capacity(), 1);
        assert_eq!(p.request(5), Some(0));
    }

    #[test]
    fn progress_stays_in_unit_range() {
        let mut p = pool(4, 0.3);
        for c in 0..4 {
            p.request(c);
        }
        for _ in 0..10 {
            p.advance();
            for (_, progress) in p.active() {
                assert!((0.0..1.0).contains(&progress));
            }
        }
    }
}
