use anyhow::Result;
use fpick::host::term;
use fpick::{CommandEngine, Keymap, PickOutcome, PickerSession};

use crate::settings::ResolvedConfig;

/// Viewport rows used until the terminal reports its real size.
const INITIAL_VIEW_ROWS: usize = 20;

/// Coordinates building and running the interactive picker.
pub(crate) struct PickerWorkflow {
    engine: CommandEngine,
    keymap: Keymap,
    session: PickerSession,
}

impl PickerWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Self {
        let ResolvedConfig {
            root,
            initial_query,
            engine_program,
            engine_args,
        } = config;

        let engine = CommandEngine::new(engine_program).with_args(engine_args);
        let session =
            PickerSession::new(root, INITIAL_VIEW_ROWS).with_initial_query(initial_query);

        Self {
            engine,
            keymap: Keymap::default(),
            session,
        }
    }

    pub(crate) fn run(self) -> Result<PickOutcome> {
        term::run(&self.engine, &self.keymap, self.session)
    }
}
