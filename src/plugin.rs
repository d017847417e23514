//! Swappable game-logic surface
//!
//! The game is three pure functions behind a process-local registry. A host
//! that wants hot reload loads a new implementation and installs its
//! function table; the next frame runs the new code. No dynamic-linking
//! machinery is assumed here - the table is the contract.

use std::sync::RwLock;

use crate::assets::AssetProvider;
use crate::audio::StereoFrame;
use crate::input::{Input, WindowIo};
use crate::render::RenderBackend;
use crate::settings::Settings;
use crate::sim::{self, GameCtx};

pub type InitFn = fn(&dyn AssetProvider, Settings, u64) -> GameCtx;
pub type StepFn = fn(
    &mut GameCtx,
    &dyn AssetProvider,
    &mut dyn WindowIo,
    &Input,
    &mut [StereoFrame],
    &mut dyn RenderBackend,
);
pub type FiniFn = fn(GameCtx);

/// The three entry points a game implementation provides
#[derive(Debug, Clone, Copy)]
pub struct GameApi {
    pub init: InitFn,
    pub step: StepFn,
    pub fini: FiniFn,
}

/// The built-in implementation
pub const BUILTIN: GameApi = GameApi {
    init: sim::game_init,
    step: sim::game_step,
    fini: sim::game_fini,
};

static REGISTRY: RwLock<GameApi> = RwLock::new(BUILTIN);

/// Current function table (copied out; cheap)
pub fn api() -> GameApi {
    *REGISTRY.read().unwrap_or_else(|err| err.into_inner())
}

/// Install a new table, returning the previous one
pub fn install(api: GameApi) -> GameApi {
    let mut registry = REGISTRY.write().unwrap_or_else(|err| err.into_inner());
    std::mem::replace(&mut *registry, api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetStore;
    use crate::input::HeadlessWindow;
    use crate::render::NullBackend;

    fn stub_init(assets: &dyn AssetProvider, settings: Settings, _seed: u64) -> GameCtx {
        // A recognizable seed so the swap is observable
        GameCtx::new(assets, settings, 0)
    }

    #[test]
    fn test_swap_and_restore() {
        let stub = GameApi {
            init: stub_init,
            ..BUILTIN
        };

        let previous = install(stub);
        assert!(std::ptr::fn_addr_eq(api().init, stub_init as InitFn));

        install(previous);
        assert!(std::ptr::fn_addr_eq(api().init, BUILTIN.init));
    }

    #[test]
    fn test_builtin_table_drives_a_frame() {
        let assets = AssetStore::new();
        let table = BUILTIN;
        let mut ctx = (table.init)(&assets, Settings::default(), 7);
        let mut win = HeadlessWindow::default();
        let mut gpu = NullBackend;
        let input = Input::default();
        let mut audio = [StereoFrame::SILENCE; 8];

        (table.step)(&mut ctx, &assets, &mut win, &input, &mut audio, &mut gpu);
        (table.fini)(ctx);
    }
}
