use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::asset::{Asset, GeoSample};
use crate::config::GalleryConfig;
use crate::error::{FlowError, Result};
use crate::geometry::Position;
use crate::layout::{compute_layout, GeoCoverage, Layout, LayoutMode};
use crate::picking::PointerEvent;
use crate::selection::{self, step_fraction, Animator, Selection};

/// What the renderer needs to draw one photo this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem<'a> {
    pub index: usize,
    pub url: &'a str,
    pub position: Position,
    pub is_selected: bool,
}

/// One gallery: assets, both layouts, the active mode, the selection and
/// the animated positions.
///
/// The session is the single writer of the selection. Layout arrays never
/// change after construction.
#[derive(Clone, Debug)]
pub struct GallerySession {
    assets: Vec<Asset>,
    samples: Vec<GeoSample>,
    layout: Layout,
    mode: LayoutMode,
    selection: Selection,
    animator: Animator,
    config: GalleryConfig,
}

impl GallerySession {
    /// Lay out `assets` and start with every photo at rest in the
    /// configured mode. Random placement is seeded from `config.layout.seed`
    /// when set.
    pub fn new(assets: Vec<Asset>, samples: Vec<GeoSample>, config: GalleryConfig) -> Self {
        let mut rng = match config.layout.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(assets, samples, config, &mut rng)
    }

    /// Like [`GallerySession::new`] with an explicit random source.
    pub fn with_rng<R: Rng>(
        assets: Vec<Asset>,
        samples: Vec<GeoSample>,
        config: GalleryConfig,
        rng: &mut R,
    ) -> Self {
        let layout = compute_layout(&assets, &samples, &config.layout, rng);
        Self::assemble(assets, samples, layout, config)
    }

    /// Assemble a session from an already computed layout.
    ///
    /// Both position arrays must hold exactly one entry per asset.
    pub fn from_parts(
        assets: Vec<Asset>,
        samples: Vec<GeoSample>,
        layout: Layout,
        config: GalleryConfig,
    ) -> Result<Self> {
        let total = assets.len();
        if layout.geo.len() != total || layout.random.len() != total {
            return Err(FlowError::InvalidConfig(format!(
                "layout has {} geo and {} random positions for {total} assets",
                layout.geo.len(),
                layout.random.len()
            )));
        }
        Ok(Self::assemble(assets, samples, layout, config))
    }

    fn assemble(
        assets: Vec<Asset>,
        samples: Vec<GeoSample>,
        layout: Layout,
        config: GalleryConfig,
    ) -> Self {
        let mode = config.layout.mode;
        let animator = Animator::new(layout.positions(mode));
        info!(assets = assets.len(), %mode, "Gallery session ready");
        Self {
            assets,
            samples,
            layout,
            mode,
            selection: Selection::new(),
            animator,
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn samples(&self) -> &[GeoSample] {
        &self.samples
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Switch layouts. Photos glide to the other array on the next ticks;
    /// the selection is kept.
    pub fn set_mode(&mut self, mode: LayoutMode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "Layout mode changed");
            self.mode = mode;
        }
    }

    pub fn toggle_mode(&mut self) -> LayoutMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// Resting positions of the active layout.
    pub fn base_positions(&self) -> &[Position] {
        self.layout.positions(self.mode)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    /// Toggle the selection of `index`. Returns the new selection.
    pub fn select(&mut self, index: usize) -> Result<Option<usize>> {
        if self.assets.is_empty() {
            return Err(FlowError::EmptyGallery);
        }
        if index >= self.assets.len() {
            return Err(FlowError::AssetIndexOutOfRange {
                index,
                total: self.assets.len(),
            });
        }
        let selected = self.selection.select(index);
        debug!(index, ?selected, "Selection toggled");
        Ok(selected)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// React to a resolved pointer press.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Option<usize>> {
        match event {
            PointerEvent::Click(index) => self.select(index),
            PointerEvent::Missed => {
                self.clear_selection();
                Ok(None)
            }
        }
    }

    /// Where every photo is heading for the given camera position.
    pub fn targets(&self, camera: Position) -> Vec<Position> {
        selection::targets(
            self.base_positions(),
            &self.selection,
            camera,
            &self.config.focus,
        )
    }

    /// Advance the animation by `dt_s` seconds and return the rendered
    /// positions. Runs every frame whether or not anything changed.
    pub fn tick(&mut self, camera: Position, dt_s: f64) -> &[Position] {
        let targets = self.targets(camera);
        let fraction = step_fraction(self.config.focus.damping, dt_s);
        self.animator.step(&targets, fraction);
        self.animator.positions()
    }

    /// Advance by exactly one reference frame, closing `damping` of the gap.
    pub fn tick_frame(&mut self, camera: Position) -> &[Position] {
        let targets = self.targets(camera);
        self.animator.step(&targets, self.config.focus.damping);
        self.animator.positions()
    }

    /// Rendered positions as of the last tick.
    pub fn rendered_positions(&self) -> &[Position] {
        self.animator.positions()
    }

    /// Snap every photo onto its current target.
    pub fn settle(&mut self, camera: Position) {
        let targets = self.targets(camera);
        self.animator.reset(&targets);
    }

    pub fn render_items(&self) -> impl Iterator<Item = RenderItem<'_>> + '_ {
        self.assets
            .iter()
            .zip(self.animator.positions())
            .enumerate()
            .map(|(index, (asset, &position))| RenderItem {
                index,
                url: &asset.url,
                position,
                is_selected: self.selection.is_selected(index),
            })
    }

    pub fn geo_coverage(&self) -> GeoCoverage {
        GeoCoverage::from_samples(&self.samples)
    }
}
