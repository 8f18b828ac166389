//! SVG rendering of the dial

use crate::{dial::DialGeometry, state::DialSnapshot};

pub const BACKGROUND: &str = "#367860";
pub const OUTLINE: &str = "white";
pub const DOT_FILL: &str = "#76D7C4";
pub const OUTLINE_WIDTH: f64 = 4.0;

/// Height of the strip under the canvas that holds the completion message
const MESSAGE_BAND: f64 = 60.0;

/// Render the dial as a standalone SVG document.
///
/// Draws the circle outline, the dot at its current position and the
/// remaining-time label; the completion message appears below the dial only
/// when the snapshot carries one.
pub fn render_svg(snapshot: &DialSnapshot, geometry: &DialGeometry) -> String {
    let width = geometry.canvas_width;
    let height = geometry.canvas_height + MESSAGE_BAND;
    let center = geometry.center;
    let dot = snapshot.dot;
    let radius = geometry.radius;
    let dot_radius = geometry.dot_radius;
    let label = escape(&snapshot.label);

    let message = snapshot
        .message
        .as_deref()
        .map(|message| {
            format!(
                r#"  <text class="message" x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="central" font-family="Helvetica" font-size="18" fill="white">{}</text>
"#,
                width / 2.0,
                geometry.canvas_height + MESSAGE_BAND / 2.0,
                escape(message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
  <rect width="100%" height="100%" fill="{BACKGROUND}"/>
  <circle class="outline" cx="{:.2}" cy="{:.2}" r="{radius:.2}" fill="none" stroke="{OUTLINE}" stroke-width="{OUTLINE_WIDTH}"/>
  <circle class="dot" cx="{:.2}" cy="{:.2}" r="{dot_radius:.2}" fill="{DOT_FILL}"/>
  <text class="label" x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="central" font-family="Helvetica" font-size="28" fill="white">{label}</text>
{message}</svg>
"#,
        center.x, center.y, dot.x, dot.y, center.x, center.y,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DialController;

    #[test]
    fn renders_outline_dot_and_label() {
        let geometry = DialGeometry::default();
        let dial = DialController::new(7200, geometry);
        let svg = render_svg(&dial.snapshot(), &geometry);

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"class="outline" cx="150.00" cy="150.00" r="100.00""#));
        assert!(svg.contains(r#"class="dot" cx="150.00" cy="50.00" r="15.00""#));
        assert!(svg.contains(">120:00</text>"));
        assert!(!svg.contains("Congratulations!"));
    }

    #[test]
    fn completion_message_only_when_completed() {
        let geometry = DialGeometry::default();
        let mut dial = DialController::new(1, geometry);
        dial.start();
        dial.on_tick();

        let svg = render_svg(&dial.snapshot(), &geometry);
        assert!(svg.contains(">Congratulations!</text>"));
        assert!(svg.contains(">0:00</text>"));

        dial.reset();
        let svg = render_svg(&dial.snapshot(), &geometry);
        assert!(!svg.contains("Congratulations!"));
    }

    #[test]
    fn document_holds_each_element_once() {
        let geometry = DialGeometry::default();
        let mut dial = DialController::new(1, geometry);
        let idle = render_svg(&dial.snapshot(), &geometry);
        assert_eq!(idle.matches("<circle").count(), 2);
        assert_eq!(idle.matches("<text").count(), 1);
        assert_eq!(idle.matches("<svg").count(), 1);
        assert!(idle.contains(r#"width="300" height="360""#));

        dial.start();
        dial.on_tick();
        let done = render_svg(&dial.snapshot(), &geometry);
        assert_eq!(done.matches("<text").count(), 2);
        assert!(done.contains(r#"class="message" x="150.00" y="330.00""#));
        assert!(done.trim_end().ends_with("</text>\n</svg>"));
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape("<a & b>"), "&lt;a &amp; b&gt;");
    }
}
