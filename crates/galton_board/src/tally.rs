use bevy::prelude::*;

use crate::particle::ParticleLanded;

/// Live histogram of landed particles.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    bins: Vec<u32>,
    total: u32,
}

impl Tally {
    pub fn new(bins: usize) -> Self {
        Self {
            bins: vec![0; bins],
            total: 0,
        }
    }

    pub fn record(&mut self, bin: usize) {
        if let Some(count) = self.bins.get_mut(bin) {
            *count += 1;
            self.total += 1;
        } else {
            warn!("ignoring landing in unknown bin {bin}");
        }
    }

    pub fn bins(&self) -> &[u32] {
        &self.bins
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}

pub fn tally_landings(mut tally: ResMut<Tally>, mut landed: EventReader<ParticleLanded>) {
    for event in landed.read() {
        tally.record(event.bin_index);
    }
}
