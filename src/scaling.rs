use std::{cell::RefCell, rc::Rc};

use tracing::info;

use crate::{
    binder::SceneStyleBinder, controller::ScaleController, error::Result, scale::FontScale,
    scene::Scene, settings::Settings,
};

/// One scaling session: a shared font size, the binder styling scenes with
/// it and the controller feeding it with intents.
#[derive(Debug)]
pub struct TextScaling {
    scale: FontScale,
    binder: SceneStyleBinder,
    controller: ScaleController,
}

impl TextScaling {
    /// # Errors
    ///
    /// Returns an error if the stylesheet cannot be created.
    pub fn new(settings: &Settings) -> Result<Self> {
        let scale = FontScale::new(&settings.bounds);
        let binder = SceneStyleBinder::new(scale.clone(), &settings.style)?;
        let controller = ScaleController::new(scale.clone()).with_input(&settings.input);

        info!(
            minimum = scale.minimum(),
            maximum = scale.maximum(),
            default = scale.default_size(),
            "text scaling initialized"
        );

        Ok(Self {
            scale,
            binder,
            controller,
        })
    }

    /// Styles `scene` with the session's size.
    pub fn init_scene<S: Scene + 'static>(&mut self, scene: &Rc<RefCell<S>>) {
        self.binder.bind(scene);
    }

    pub fn scale(&self) -> &FontScale {
        &self.scale
    }

    pub fn binder(&self) -> &SceneStyleBinder {
        &self.binder
    }

    pub fn binder_mut(&mut self) -> &mut SceneStyleBinder {
        &mut self.binder
    }

    pub fn controller(&self) -> &ScaleController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ScaleController {
        &mut self.controller
    }

    /// Applies the current frame's egui input, see [`ScaleController::ui`].
    pub fn ui(&self, ctx: &egui::Context) -> usize {
        self.controller.ui(ctx)
    }
}
