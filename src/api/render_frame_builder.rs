use crate::core::{
    CoordinateMapper, DataPoint, LineSegment, points_from, points_up_to, project_grid_segments,
    project_line_segments,
};
use crate::error::DrawResult;
use crate::render::{
    Color, DotPrimitive, LinePrimitive, LineStrokeStyle, RectPrimitive, RenderFrame, Renderer,
};

use super::{DrawSession, PointsDisplay};

const DATA_LINE_WIDTH: f64 = 2.0;
const DRAWN_LINE_WIDTH: f64 = 3.0;
const USER_LINE_WIDTH: f64 = 2.0;
const FINISHED_ALPHA: f64 = 0.5;
const USER_LINE_ALPHA: f64 = 0.75;
const DOT_RADIUS: f64 = 2.0;

impl DrawSession {
    /// Materializes the current session state into draw primitives.
    ///
    /// Read-only: building a frame never mutates the grid or the lines.
    pub fn build_render_frame(&self) -> DrawResult<RenderFrame> {
        let mapper = self.mapper;
        let mut frame = RenderFrame::new(mapper.viewport());

        self.append_draw_region(&mut frame)?;

        let shown = if self.config.free_draw {
            Vec::new()
        } else {
            points_up_to(
                self.series.line.points(),
                self.config.draw_start.unwrap_or(f64::NEG_INFINITY),
            )
        };
        push_segments(
            &mut frame,
            &project_line_segments(&shown, mapper)?,
            DATA_LINE_WIDTH,
            self.config.data_line_color,
            LineStrokeStyle::Solid,
        );

        let status = self.status();
        if self.config.show_finished && status.is_started() {
            self.append_finished(&mut frame)?;
        }

        push_segments(
            &mut frame,
            &project_grid_segments(self.grid.points(), mapper)?,
            DRAWN_LINE_WIDTH,
            self.config.drawn_line_color,
            LineStrokeStyle::Dotted,
        );

        for line in self.lines.completed() {
            push_segments(
                &mut frame,
                &project_line_segments(&line.points, mapper)?,
                USER_LINE_WIDTH,
                line.style.color.with_alpha(USER_LINE_ALPHA),
                line.style.stroke,
            );
        }
        if let Some(active) = self.active_line() {
            let style = active.style();
            push_segments(
                &mut frame,
                &project_line_segments(active.points(), mapper)?,
                USER_LINE_WIDTH,
                style.color.with_alpha(USER_LINE_ALPHA),
                style.stroke,
            );
        }

        self.append_scatter(&mut frame, mapper)?;
        Ok(frame)
    }

    /// Builds and hands one frame to `renderer`.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> DrawResult<()> {
        let frame = self.build_render_frame()?;
        renderer.render(&frame)
    }

    fn append_draw_region(&self, frame: &mut RenderFrame) -> DrawResult<()> {
        let Some((start, end)) = self.draw_region() else {
            return Ok(());
        };
        let (domain_start, domain_end) = self.mapper.x_domain();
        let start = start.clamp(domain_start, domain_end);
        let end = end.clamp(domain_start, domain_end);
        let left = self.mapper.x_to_render(start)?;
        let right = self.mapper.x_to_render(end)?;
        frame.rects.push(RectPrimitive::new(
            left.min(right),
            0.0,
            (right - left).abs(),
            f64::from(frame.viewport.height),
            Color::DRAW_REGION,
        ));
        Ok(())
    }

    /// Reveal of the actual continuation and its interval bounds.
    fn append_finished(&self, frame: &mut RenderFrame) -> DrawResult<()> {
        let mapper = self.mapper;
        let visible = |points: &[DataPoint]| match self.config.draw_start {
            Some(start) if !self.config.free_draw => points_from(points, start),
            _ => points.to_vec(),
        };
        let color = self.config.data_line_color.with_alpha(FINISHED_ALPHA);

        push_segments(
            frame,
            &project_line_segments(&visible(self.series.line.points()), mapper)?,
            DATA_LINE_WIDTH,
            color,
            LineStrokeStyle::Solid,
        );
        for bound in [&self.series.lower_bound, &self.series.upper_bound]
            .into_iter()
            .flatten()
        {
            push_segments(
                frame,
                &project_line_segments(&visible(bound.points()), mapper)?,
                DATA_LINE_WIDTH,
                color,
                LineStrokeStyle::Dashed,
            );
        }
        Ok(())
    }

    fn append_scatter(&self, frame: &mut RenderFrame, mapper: CoordinateMapper) -> DrawResult<()> {
        let Some(points) = &self.series.points else {
            return Ok(());
        };
        let shown = match self.config.points {
            PointsDisplay::None => return Ok(()),
            PointsDisplay::Partial { end } => points_up_to(points.points(), end),
            PointsDisplay::Full => points.points().to_vec(),
        };
        let color = Color::BLACK.with_alpha(0.8);
        for point in shown {
            let mapped = mapper.to_render(point)?;
            frame
                .dots
                .push(DotPrimitive::new(mapped.x, mapped.y, DOT_RADIUS, color));
        }
        Ok(())
    }
}

fn push_segments(
    frame: &mut RenderFrame,
    segments: &[LineSegment],
    width: f64,
    color: Color,
    stroke_style: LineStrokeStyle,
) {
    frame.lines.extend(segments.iter().map(|segment| {
        LinePrimitive::new(segment.x1, segment.y1, segment.x2, segment.y2, width, color)
            .with_stroke_style(stroke_style)
    }));
}
