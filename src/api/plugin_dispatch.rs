use tracing::trace;

use crate::error::{DrawError, DrawResult};
use crate::extensions::{SessionContext, SessionEvent, SessionPlugin};

use super::DrawSession;

impl DrawSession {
    /// Registers a plugin with unique identifier.
    pub fn register_plugin(&mut self, plugin: Box<dyn SessionPlugin>) -> DrawResult<()> {
        let plugin_id = plugin.id().to_owned();
        if plugin_id.is_empty() {
            return Err(DrawError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.has_plugin(&plugin_id) {
            return Err(DrawError::InvalidData(format!(
                "plugin with id `{plugin_id}` is already registered"
            )));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        if let Some(position) = self
            .plugins
            .iter()
            .position(|entry| entry.id() == plugin_id)
        {
            self.plugins.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.id() == plugin_id)
    }

    #[must_use]
    pub fn plugin_context(&self) -> SessionContext {
        SessionContext {
            viewport: self.viewport(),
            status: self.status(),
            filled: self.grid.filled_count(),
            total: self.grid.len(),
            completed_lines: self.lines.completed().len(),
            drawing_line: self.lines.state().is_drawing(),
        }
    }

    pub(super) fn emit_event(&mut self, event: SessionEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        trace!(?event, plugins = self.plugins.len(), "dispatching session event");
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}
