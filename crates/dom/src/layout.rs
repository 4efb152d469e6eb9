use breakpoints::WidthBox;

/// Horizontal box metrics for one element, in CSS pixels.
///
/// Each edge value is the sum of the left and right sides.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxMetrics {
    pub content: f64,
    pub padding: f64,
    pub border: f64,
    pub margin: f64,
}

impl BoxMetrics {
    /// Metrics for an element with no padding, border or margin.
    pub fn content(width: f64) -> Self {
        Self {
            content: width,
            ..Self::default()
        }
    }

    /// Width of the requested box.
    pub fn width(&self, sizing: WidthBox) -> f64 {
        match sizing {
            WidthBox::Content => self.content,
            WidthBox::Inner => self.content + self.padding,
            WidthBox::Outer => self.content + self.padding + self.border,
            WidthBox::OuterWithMargin => self.content + self.padding + self.border + self.margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_edges_accumulate() {
        let metrics = BoxMetrics {
            content: 400.0,
            padding: 40.0,
            border: 2.0,
            margin: 20.0,
        };
        assert!((metrics.width(WidthBox::Content) - 400.0).abs() < f64::EPSILON);
        assert!((metrics.width(WidthBox::Inner) - 440.0).abs() < f64::EPSILON);
        assert!((metrics.width(WidthBox::Outer) - 442.0).abs() < f64::EPSILON);
        assert!((metrics.width(WidthBox::OuterWithMargin) - 462.0).abs() < f64::EPSILON);
    }
}
