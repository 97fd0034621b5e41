//! Top-level rendering entry point.
//!
//! Computes the view model for the current terminal size and hands it to
//! the loading screen or the content layout.

use crate::app::PickerState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the picker to stdout.
pub fn render(state: &PickerState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if let Some(loading) = &vm.loading {
        components::render_loading(loading, theme, rows, cols);
        return;
    }

    components::render_content(vm, theme, cols, rows);
}
