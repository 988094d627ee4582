// src/render/renderer.rs
//! Staged presentation of an analysis result
//!
//! Each call to [`ResultRenderer::render`] starts a new generation. Every
//! staggered step re-checks the generation under the state lock before it
//! commits, so a newer render or a `clear` silently abandons older work.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::score::{format_score, ScoreCounter, DEFAULT_SCORE_STEPS};
use super::view::{EntranceCue, Panel, ResultsView};
use crate::charts::{adapter, ChartDescriptor, ChartRegistry, ChartSlot};
use crate::types::{AnalysisResult, TextBlock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTiming {
    /// Base delay between consecutive charts and entrance cues.
    pub stagger: Duration,
    pub score_tick: Duration,
    pub score_steps: u32,
}

impl Default for RenderTiming {
    fn default() -> Self {
        Self {
            stagger: Duration::from_millis(100),
            score_tick: Duration::from_millis(30),
            score_steps: DEFAULT_SCORE_STEPS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Completed,
    Superseded,
}

struct RenderState {
    registry: ChartRegistry,
    view: ResultsView,
}

#[derive(Clone)]
pub struct ResultRenderer {
    state: Arc<Mutex<RenderState>>,
    generation: Arc<AtomicU64>,
    timing: RenderTiming,
}

impl ResultRenderer {
    pub fn new(registry: ChartRegistry, timing: RenderTiming) -> Self {
        Self {
            state: Arc::new(Mutex::new(RenderState {
                registry,
                view: ResultsView::default(),
            })),
            generation: Arc::new(AtomicU64::new(0)),
            timing,
        }
    }

    pub fn headless(timing: RenderTiming) -> Self {
        Self::new(ChartRegistry::headless(), timing)
    }

    pub fn timing(&self) -> RenderTiming {
        self.timing
    }

    pub async fn render(&self, result: &AnalysisResult) -> RenderOutcome {
        let generation = {
            let mut state = self.lock();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.registry.destroy_all();
            state.view = ResultsView::revealed();
            state.view.score_description = result.score_description.clone();
            generation
        };
        info!("Rendering analysis result (generation {})", generation);

        let (score_done, charts_done) = tokio::join!(
            self.animate_score(generation, result.overall_score),
            self.stage_charts(generation, result),
        );
        if !(score_done && charts_done) {
            debug!("Render generation {} superseded", generation);
            return RenderOutcome::Superseded;
        }

        let additional_points = result.additional_points.as_ref().map(TextBlock::items);
        let improvements = result.improvements.as_ref().map(TextBlock::items);
        let stagger = self.timing.stagger;

        let committed = self.commit(generation, move |state| {
            state.view.additional_points = additional_points;
            state.view.improvements = improvements;
            state.view.entrance = entrance_cues(&state.view, stagger);
        });

        if committed {
            info!("Render generation {} completed", generation);
            RenderOutcome::Completed
        } else {
            debug!("Render generation {} superseded", generation);
            RenderOutcome::Superseded
        }
    }

    /// Hide results, destroy every chart and abandon any in-flight render.
    pub fn clear(&self) {
        let mut state = self.lock();
        self.generation.fetch_add(1, Ordering::SeqCst);
        state.registry.destroy_all();
        state.view = ResultsView::default();
    }

    pub fn snapshot(&self) -> ResultsView {
        self.lock().view.clone()
    }

    pub fn charts(&self) -> Vec<ChartDescriptor> {
        self.lock().registry.descriptors()
    }

    pub fn chart(&self, id: &str) -> Option<ChartDescriptor> {
        self.lock().registry.get(id).cloned()
    }

    pub fn live_chart_count(&self) -> usize {
        self.lock().registry.len()
    }

    async fn animate_score(&self, generation: u64, target: Option<f64>) -> bool {
        let Some(target) = target else {
            return true;
        };

        for value in ScoreCounter::new(target, self.timing.score_steps) {
            tokio::time::sleep(self.timing.score_tick).await;
            let text = format_score(value);
            if !self.commit(generation, |state| state.view.score = Some(text)) {
                return false;
            }
        }
        true
    }

    async fn stage_charts(&self, generation: u64, result: &AnalysisResult) -> bool {
        for (index, slot) in ChartSlot::ALL.into_iter().enumerate() {
            let delay = self.timing.stagger * index as u32;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let descriptor = adapter::describe(slot, result);
            let committed = self.commit(generation, |state| {
                if let Err(e) = state.registry.upsert(descriptor) {
                    warn!("Skipping chart {}: {:#}", slot.id(), e);
                }
            });
            if !committed {
                return false;
            }
        }
        true
    }

    fn commit<F>(&self, generation: u64, apply: F) -> bool
    where
        F: FnOnce(&mut RenderState),
    {
        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        apply(&mut state);
        true
    }

    fn lock(&self) -> MutexGuard<'_, RenderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn entrance_cues(view: &ResultsView, stagger: Duration) -> Vec<EntranceCue> {
    let mut panels: Vec<Panel> = ChartSlot::ALL.into_iter().map(Panel::Chart).collect();
    if view.additional_points.is_some() {
        panels.push(Panel::AdditionalPoints);
    }
    if view.improvements.is_some() {
        panels.push(Panel::Improvements);
    }

    panels
        .into_iter()
        .enumerate()
        .map(|(index, panel)| EntranceCue {
            panel,
            delay: stagger * index as u32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartBackend, ChartHandle};
    use crate::types::ScoreMap;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingBackend {
        live: Arc<AtomicUsize>,
        next: u64,
        fail_on: Option<&'static str>,
    }

    impl ChartBackend for CountingBackend {
        fn create(&mut self, descriptor: &ChartDescriptor) -> anyhow::Result<ChartHandle> {
            if self.fail_on == Some(descriptor.id.as_str()) {
                anyhow::bail!("no canvas for {}", descriptor.id);
            }
            self.next += 1;
            self.live.fetch_add(1, Ordering::SeqCst);
            Ok(ChartHandle(self.next))
        }

        fn destroy(&mut self, _handle: ChartHandle) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn scores(entries: &[(&str, f64)]) -> ScoreMap {
        entries
            .iter()
            .map(|(name, score)| (name.to_string(), *score))
            .collect()
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            overall_score: Some(82.0),
            score_description: Some("Good fit".to_string()),
            skills_match: Some(scores(&[("Python", 90.0), ("SQL", 70.0)])),
            additional_points: Some(TextBlock::Items(vec![
                "Led migrations".to_string(),
                "Mentors juniors".to_string(),
            ])),
            improvements: Some(TextBlock::Single("Quantify impact".to_string())),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn renders_score_charts_and_panels() {
        let renderer = ResultRenderer::headless(RenderTiming::default());
        let outcome = renderer.render(&sample_result()).await;
        assert_eq!(outcome, RenderOutcome::Completed);

        let view = renderer.snapshot();
        assert!(view.visible);
        assert_eq!(view.score.as_deref(), Some("82"));
        assert_eq!(view.score_description.as_deref(), Some("Good fit"));
        assert_eq!(
            view.additional_points,
            Some(vec!["Led migrations".to_string(), "Mentors juniors".to_string()])
        );
        assert_eq!(view.improvements, Some(vec!["Quantify impact".to_string()]));

        let skills = renderer.chart("skillsChart").unwrap();
        assert_eq!(skills.series.category_count(), 2);
        for id in ["experienceChart", "educationChart", "complianceChart"] {
            assert_eq!(renderer.chart(id).unwrap().series.category_count(), 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn charts_arrive_in_fixed_order() {
        let renderer = ResultRenderer::headless(RenderTiming::default());
        renderer.render(&AnalysisResult::default()).await;

        let ids: Vec<String> = renderer.charts().into_iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec!["skillsChart", "experienceChart", "educationChart", "complianceChart"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn empty_result_renders_four_empty_charts() {
        let renderer = ResultRenderer::headless(RenderTiming::default());
        let outcome = renderer.render(&AnalysisResult::default()).await;

        assert_eq!(outcome, RenderOutcome::Completed);
        let charts = renderer.charts();
        assert_eq!(charts.len(), 4);
        assert!(charts.iter().all(|chart| chart.series.is_empty()));

        let view = renderer.snapshot();
        assert_eq!(view.score, None);
        assert_eq!(view.additional_points, None);
        assert_eq!(view.improvements, None);
        assert_eq!(view.entrance.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn rendering_twice_keeps_four_live_instances() {
        let live = Arc::new(AtomicUsize::new(0));
        let backend = CountingBackend {
            live: live.clone(),
            ..Default::default()
        };
        let renderer =
            ResultRenderer::new(ChartRegistry::new(Box::new(backend)), RenderTiming::default());

        renderer.render(&sample_result()).await;
        renderer.render(&sample_result()).await;

        assert_eq!(renderer.live_chart_count(), 4);
        assert_eq!(live.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_render_supersedes_pending_steps() {
        let renderer = ResultRenderer::headless(RenderTiming::default());

        let first = {
            let renderer = renderer.clone();
            tokio::spawn(async move { renderer.render(&sample_result()).await })
        };
        tokio::time::sleep(Duration::from_millis(150)).await;

        let second = AnalysisResult {
            overall_score: Some(40.0),
            skills_match: Some(scores(&[("Rust", 60.0)])),
            ..Default::default()
        };
        let outcome = renderer.render(&second).await;

        assert_eq!(outcome, RenderOutcome::Completed);
        assert_eq!(first.await.unwrap(), RenderOutcome::Superseded);

        let view = renderer.snapshot();
        assert_eq!(view.score.as_deref(), Some("40"));
        assert_eq!(view.score_description, None);
        assert_eq!(view.additional_points, None);
        assert_eq!(renderer.live_chart_count(), 4);
        let skills = renderer.chart("skillsChart").unwrap();
        assert_eq!(skills.series.labels, vec!["Rust"]);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_abandons_in_flight_render() {
        let renderer = ResultRenderer::headless(RenderTiming::default());

        let pending = {
            let renderer = renderer.clone();
            tokio::spawn(async move { renderer.render(&sample_result()).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        renderer.clear();

        assert_eq!(pending.await.unwrap(), RenderOutcome::Superseded);
        assert!(renderer.snapshot().is_cleared());
        assert_eq!(renderer.live_chart_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_chart_does_not_block_others() {
        let backend = CountingBackend {
            fail_on: Some("experienceChart"),
            ..Default::default()
        };
        let renderer =
            ResultRenderer::new(ChartRegistry::new(Box::new(backend)), RenderTiming::default());

        let outcome = renderer.render(&sample_result()).await;

        assert_eq!(outcome, RenderOutcome::Completed);
        assert_eq!(renderer.live_chart_count(), 3);
        assert!(renderer.chart("experienceChart").is_none());
        assert!(renderer.chart("complianceChart").is_some());
        assert_eq!(renderer.snapshot().improvements.map(|items| items.len()), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn entrance_cues_follow_document_order() {
        let renderer = ResultRenderer::headless(RenderTiming::default());
        renderer.render(&sample_result()).await;

        let cues = renderer.snapshot().entrance;
        let panels: Vec<Panel> = cues.iter().map(|cue| cue.panel).collect();
        assert_eq!(
            panels,
            vec![
                Panel::Chart(ChartSlot::Skills),
                Panel::Chart(ChartSlot::Experience),
                Panel::Chart(ChartSlot::Education),
                Panel::Chart(ChartSlot::Compliance),
                Panel::AdditionalPoints,
                Panel::Improvements,
            ]
        );
        assert_eq!(cues[0].delay, Duration::ZERO);
        assert_eq!(cues[5].delay, Duration::from_millis(500));
    }
}
