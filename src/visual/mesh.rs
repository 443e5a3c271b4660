use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::{
    Extent3d, PrimitiveTopology, TextureDimension, TextureFormat,
};

use crate::error::FieldError;
use crate::particles::{
    DisplacementBitmap, PixelImage, PointField, QUAD_INDICES, QUAD_POSITIONS, QUAD_UVS,
};

/// Expand the attribute buffers into one quad per particle
///
/// POSITION is the pixel offset plus the quad corner, UV_0 the corner uv and
/// UV_1 carries `(pixel index, angle)` for the shader.
pub fn build_particle_mesh(points: &PointField) -> Mesh {
    let vertex_count = points.num_visible() * QUAD_POSITIONS.len();
    let mut positions = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    let mut seeds = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity(points.num_visible() * QUAD_INDICES.len());

    for particle in points.particles() {
        let base = positions.len() as u32;
        let (x, y) = (particle.offset.0 as f32, particle.offset.1 as f32);

        for (corner, uv) in QUAD_POSITIONS.iter().zip(QUAD_UVS) {
            positions.push([x + corner[0], y + corner[1], corner[2]]);
            uvs.push(uv);
            seeds.push([particle.pixel_index as f32, particle.angle]);
        }
        indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_1, seeds)
        .with_inserted_indices(Indices::U32(indices))
}

/// Texture the shader samples for touch displacement
pub fn build_touch_image(bitmap: &DisplacementBitmap) -> Image {
    let size = bitmap.size() as u32;
    let mut image = Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        bitmap.to_rgba8(),
        TextureFormat::Rgba8Unorm,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::linear();
    image
}

/// Read a decoded asset back as bottom-up RGBA8 pixels
pub fn pixel_image_from(image: &Image) -> Result<PixelImage, FieldError> {
    let width = image.width();
    let height = image.height();
    let format = image.texture_descriptor.format;

    let converted;
    let source = match format {
        TextureFormat::Rgba8Unorm | TextureFormat::Rgba8UnormSrgb => image,
        _ => {
            converted = image.convert(TextureFormat::Rgba8UnormSrgb).ok_or_else(|| {
                FieldError::invalid_image(width, height, format!("unsupported format {:?}", format))
            })?;
            &converted
        }
    };

    let data = source
        .data
        .clone()
        .ok_or_else(|| FieldError::invalid_image(width, height, "no pixel data on the CPU"))?;

    PixelImage::from_top_down(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SamplingConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rgba_image(width: u32, height: u32, data: Vec<u8>) -> Image {
        Image::new(
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            data,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }

    #[test]
    fn test_mesh_has_a_quad_per_particle() {
        let image = PixelImage::new(3, 1, vec![0, 0, 0, 255, 90, 0, 0, 255, 90, 0, 0, 255]).unwrap();
        let points = PointField::build_with_rng(
            &image,
            SamplingConfig::default(),
            &mut StdRng::seed_from_u64(7),
        );
        let mesh = build_particle_mesh(&points);

        assert_eq!(mesh.count_vertices(), 8);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(12));
    }

    #[test]
    fn test_quad_corners_surround_offset() {
        let image = PixelImage::new(2, 1, vec![255; 8]).unwrap();
        let points = PointField::build_with_rng(
            &image,
            SamplingConfig::default(),
            &mut StdRng::seed_from_u64(7),
        );
        let mesh = build_particle_mesh(&points);

        let Some(bevy::mesh::VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        // Second particle sits at pixel (1, 0)
        assert_eq!(positions[4], [0.5, 0.5, 0.0]);
        assert_eq!(positions[7], [1.5, -0.5, 0.0]);
    }

    #[test]
    fn test_pixel_image_from_flips_rows() {
        // top row red=10, bottom row red=20
        let image = rgba_image(1, 2, vec![10, 0, 0, 255, 20, 0, 0, 255]);
        let pixels = pixel_image_from(&image).unwrap();

        assert_eq!(pixels.red(0), 20);
        assert_eq!(pixels.red(1), 10);
    }

    #[test]
    fn test_touch_image_matches_bitmap() {
        let bitmap = DisplacementBitmap::new(64);
        let image = build_touch_image(&bitmap);

        assert_eq!(image.width(), 64);
        assert_eq!(image.data.as_ref().map(|d| d.len()), Some(64 * 64 * 4));
    }
}
