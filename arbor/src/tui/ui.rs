use ratatui::{widgets::Paragraph, Frame};

/// Draw the root's composed screen over the whole frame
pub fn render(frame: &mut Frame, screen: &str) {
    frame.render_widget(Paragraph::new(screen.to_string()), frame.area());
}
