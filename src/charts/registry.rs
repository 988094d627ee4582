// src/charts/registry.rs
//! Lifecycle of live chart instances, at most one per chart id

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{debug, trace};

use super::ChartDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// Whatever actually draws charts. The registry guarantees `destroy` is called
/// for an id's previous instance before `create` runs for its replacement.
pub trait ChartBackend: Send {
    fn create(&mut self, descriptor: &ChartDescriptor) -> Result<ChartHandle>;
    fn destroy(&mut self, handle: ChartHandle);
}

/// Backend with no drawing surface; tracks which handles are alive.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u64,
    live: HashSet<u64>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_instances(&self) -> usize {
        self.live.len()
    }
}

impl ChartBackend for HeadlessBackend {
    fn create(&mut self, descriptor: &ChartDescriptor) -> Result<ChartHandle> {
        self.next_handle += 1;
        self.live.insert(self.next_handle);
        trace!("Created headless chart {} as #{}", descriptor.id, self.next_handle);
        Ok(ChartHandle(self.next_handle))
    }

    fn destroy(&mut self, handle: ChartHandle) {
        self.live.remove(&handle.0);
    }
}

struct LiveChart {
    handle: ChartHandle,
    descriptor: ChartDescriptor,
}

pub struct ChartRegistry {
    backend: Box<dyn ChartBackend>,
    charts: IndexMap<String, LiveChart>,
}

impl ChartRegistry {
    pub fn new(backend: Box<dyn ChartBackend>) -> Self {
        Self {
            backend,
            charts: IndexMap::new(),
        }
    }

    pub fn headless() -> Self {
        Self::new(Box::new(HeadlessBackend::new()))
    }

    /// Replace the chart registered under the descriptor's id.
    pub fn upsert(&mut self, descriptor: ChartDescriptor) -> Result<()> {
        if let Some(previous) = self.charts.shift_remove(&descriptor.id) {
            debug!("Destroying previous chart instance: {}", descriptor.id);
            self.backend.destroy(previous.handle);
        }

        let handle = self
            .backend
            .create(&descriptor)
            .with_context(|| format!("Failed to create chart: {}", descriptor.id))?;

        self.charts
            .insert(descriptor.id.clone(), LiveChart { handle, descriptor });
        Ok(())
    }

    pub fn destroy_all(&mut self) {
        if self.charts.is_empty() {
            return;
        }

        debug!("Destroying {} chart instances", self.charts.len());
        for (_, chart) in self.charts.drain(..) {
            self.backend.destroy(chart.handle);
        }
    }

    pub fn get(&self, id: &str) -> Option<&ChartDescriptor> {
        self.charts.get(id).map(|chart| &chart.descriptor)
    }

    /// Live descriptors in creation order.
    pub fn descriptors(&self) -> Vec<ChartDescriptor> {
        self.charts
            .values()
            .map(|chart| chart.descriptor.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}
