use eframe::egui;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help & Shortcuts")
        .open(open)
        .resizable(true)
        .default_width(480.0)
        .default_height(420.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Keyboard Shortcuts");
                ui.separator();

                ui.label("General");
                help_row(ui, "⌘⇧P", "Open command palette");
                help_row(ui, "F1", "Show this window");
                help_row(ui, "⌘N / ⌘O / ⌘S", "New / Open / Save (not implemented)");
                help_row(ui, "⌘Z / ⌘⇧Z", "Undo / Redo (not implemented)");

                ui.add_space(10.0);
                ui.label("Drawing");
                help_row(ui, "Escape", "Cancel placement, back to Select");
                help_row(ui, "Right-click", "Cancel placement");
                help_row(ui, "F", "Flip swing of the door being placed");
                help_row(ui, "Delete / Backspace", "Delete selection");

                ui.add_space(10.0);
                ui.label("View");
                help_row(ui, "Ctrl + wheel", "Zoom about the pointer");
                help_row(ui, "Wheel", "Scroll");
                help_row(ui, "Space + drag", "Pan");

                ui.add_space(20.0);
                ui.heading("Placing shapes");
                ui.separator();
                ui.label("Pick Wall, Door or Window in the palette, click once for the start point and again for the end point. The mode stays active for the next shape.");
                ui.label("Furniture is placed with a single click and the mode returns to Select.");
                ui.label("All points snap to the grid.");

                ui.add_space(20.0);
                ui.heading("Editing");
                ui.separator();
                ui.label("• Select a wall to show its endpoint handles, drag them to reshape it");
                ui.label("• Select furniture and drag the corner square to resize it");
                ui.label("• Deleting any part of a door or window removes the whole thing");
                ui.label("• Shift/Ctrl-click adds to the selection");

                ui.add_space(20.0);
                ui.heading("Settings");
                ui.separator();
                ui.label("Read from ~/.config/planify.toml or ./settings.toml:");
                ui.code(
                    r##"grid_size = 50.0
door_counter_clockwise = true
zoom_step = 1.25
min_zoom = 0.1
max_zoom = 8.0"##,
                );
            });
        });
}

fn help_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [120.0, 16.0],
            egui::Label::new(egui::RichText::new(shortcut).monospace().strong()),
        );
        ui.label(description);
    });
}
