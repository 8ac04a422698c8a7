// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgfilters::Region;

use crate::context::RenderContext;
use crate::filter::*;
use crate::{Image, RenderState};

/// Renders a filter.
///
/// Applies `filter` primitives to the `source` image and draws the whole last result
/// over the `background`.
///
/// Each primitive only writes inside its bounds, which never leave the filter region.
/// A filter without primitives draws the `source` as is.
///
/// `source` defines the canvas size. Rendering never fails: invalid regions,
/// unknown references and malformed attributes only degrade the output.
pub fn render(filter: &Filter, source: &Image, background: &mut Image, state: &RenderState) {
    let mut ctx = match RenderContext::new(filter, source, background, state) {
        Some(ctx) => ctx,
        None => return,
    };

    for primitive in &filter.primitives {
        let region = ctx.bounds(primitive);
        let result = match primitive.kind {
            Kind::Blend(ref fe) => apply_blend(fe, region, &ctx),
            Kind::ColorMatrix(ref fe) => apply_color_matrix(fe, region, &ctx),
            Kind::ComponentTransfer(ref fe) => apply_component_transfer(fe, region, &ctx),
            Kind::Composite(ref fe) => apply_composite(fe, region, &ctx),
            Kind::ConvolveMatrix(ref fe) => apply_convolve_matrix(fe, region, &ctx),
            Kind::GaussianBlur(ref fe) => apply_blur(fe, region, &ctx),
            Kind::Merge(ref fe) => apply_merge(fe, region, &ctx),
            Kind::Morphology(ref fe) => apply_morphology(fe, region, &ctx),
            Kind::Offset(ref fe) => apply_offset(fe, region, &ctx),
        };

        ctx.store_result(&primitive.result, result);
    }

    // Primitive outputs are already cleared outside their bounds.
    let last = ctx.last_result();
    let region = Region::from_size(last.width(), last.height());
    svgfilters::alpha_blit(last.as_image_ref(), region, background.as_image_ref_mut(), 0, 0);
}

fn apply_blur(fe: &GaussianBlur, region: Region, ctx: &RenderContext) -> Image {
    let input = ctx.get_input(&fe.input);
    let mut output = input.new_cleared();

    let ts = ctx.primitive_ts();
    let std_dx = fe.std_dev_x * ts.sx.abs();
    let std_dy = fe.std_dev_y * ts.sy.abs();

    if !(std_dx > 0.0) && !(std_dy > 0.0) {
        svgfilters::offset(0, 0, input.as_image_ref(), region, output.as_image_ref_mut());
        return output;
    }

    // The exact kernel collapses to its centre tap for wide deviations.
    if std_dx * std_dy <= 4.0 && std_dx.max(std_dy) <= 4.0 {
        log::debug!("Exact blur with {}x{} deviation.", std_dx, std_dy);
        svgfilters::exact_blur(std_dx, std_dy, input.as_image_ref(), region, output.as_image_ref_mut());
    } else {
        log::debug!("Box blur with {}x{} deviation.", std_dx, std_dy);
        svgfilters::box_blur(std_dx, std_dy, input.as_image_ref(), region, output.as_image_ref_mut());
    }

    output
}

fn apply_offset(fe: &Offset, region: Region, ctx: &RenderContext) -> Image {
    let input = ctx.get_input(&fe.input);
    let mut output = input.new_cleared();

    let ts = ctx.primitive_ts();
    let dx = (fe.dx * ts.sx) as i32;
    let dy = (fe.dy * ts.sy) as i32;

    svgfilters::offset(dx, dy, input.as_image_ref(), region, output.as_image_ref_mut());
    output
}

fn apply_blend(fe: &Blend, region: Region, ctx: &RenderContext) -> Image {
    let input1 = ctx.get_input(&fe.input1);
    let input2 = ctx.get_input(&fe.input2);
    let mut output = input1.new_cleared();

    svgfilters::blend(
        fe.mode, input1.as_image_ref(), input2.as_image_ref(), region, output.as_image_ref_mut(),
    );

    output
}

fn apply_composite(fe: &Composite, region: Region, ctx: &RenderContext) -> Image {
    let input1 = ctx.get_input(&fe.input1);
    let input2 = ctx.get_input(&fe.input2);
    let mut output = input1.new_cleared();

    svgfilters::composite(
        fe.operator, input1.as_image_ref(), input2.as_image_ref(), region, output.as_image_ref_mut(),
    );

    output
}

fn apply_merge(fe: &Merge, region: Region, ctx: &RenderContext) -> Image {
    let mut output = ctx.last_result().new_cleared();
    for input in &fe.inputs {
        let input = ctx.get_input(input);
        svgfilters::alpha_blit(
            input.as_image_ref(), region, output.as_image_ref_mut(), region.x1(), region.y1(),
        );
    }

    output
}

fn apply_color_matrix(fe: &ColorMatrix, region: Region, ctx: &RenderContext) -> Image {
    let input = ctx.get_input(&fe.input);
    let mut output = input.new_cleared();

    svgfilters::color_matrix(
        fe.kind.as_raster(), input.as_image_ref(), region, output.as_image_ref_mut(),
    );

    output
}

fn apply_component_transfer(fe: &ComponentTransfer, region: Region, ctx: &RenderContext) -> Image {
    let input = ctx.get_input(&fe.input);
    let mut output = input.new_cleared();

    svgfilters::component_transfer(
        fe.func_r.as_raster(),
        fe.func_g.as_raster(),
        fe.func_b.as_raster(),
        fe.func_a.as_raster(),
        input.as_image_ref(),
        region,
        output.as_image_ref_mut(),
    );

    output
}

fn apply_convolve_matrix(fe: &ConvolveMatrix, region: Region, ctx: &RenderContext) -> Image {
    let input = ctx.get_input(&fe.input);
    let mut output = input.new_cleared();

    let ts = ctx.primitive_ts();
    let unit = match fe.unit_length {
        Some((dx, dy)) => (dx * ts.sx.abs(), dy * ts.sy.abs()),
        None => (1.0, 1.0),
    };

    let matrix = svgfilters::ConvolveMatrix::new(
        fe.target_x, fe.target_y, fe.order_x, fe.order_y, &fe.matrix,
    ).unwrap_or_else(svgfilters::ConvolveMatrix::empty);

    svgfilters::convolve_matrix(
        matrix,
        fe.divisor,
        fe.bias,
        unit,
        fe.edge_mode,
        fe.preserve_alpha,
        input.as_image_ref(),
        region,
        output.as_image_ref_mut(),
    );

    output
}

fn apply_morphology(fe: &Morphology, region: Region, ctx: &RenderContext) -> Image {
    let input = ctx.get_input(&fe.input);
    let mut output = input.new_cleared();

    let ts = ctx.primitive_ts();
    let rx = (fe.radius_x * ts.sx.abs()) as u32;
    let ry = (fe.radius_y * ts.sy.abs()) as u32;

    svgfilters::morphology(
        fe.operator, rx, ry, input.as_image_ref(), region, output.as_image_ref_mut(),
    );

    output
}
