use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::config::FieldConfig;
use crate::particles::FieldEvent;
use crate::visual::material::{ParticleMaterial, ParticleUniform};
use crate::visual::mesh::{build_particle_mesh, build_touch_image};
use crate::visual::runtime::{FieldRender, FieldRuntime, ParticleFieldMesh};

/// System: Advance the field one frame (trail, time, animations, pending hide)
pub fn tick_field(time: Res<Time>, mut runtime: ResMut<FieldRuntime>) {
    runtime.field.update(time.delta_secs());
}

/// System: Spawn, show and release rendering objects as the field changes state
pub fn apply_field_events(
    mut commands: Commands,
    mut runtime: ResMut<FieldRuntime>,
    config: Res<FieldConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ParticleMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let runtime = &mut *runtime;

    for event in runtime.field.drain_events() {
        match event {
            FieldEvent::Built {
                num_visible,
                num_points,
            } => {
                info!("Particle field built: {} of {} pixels visible", num_visible, num_points);
                runtime.field.resize(config.camera);
                spawn_field(&mut commands, runtime, &mut meshes, &mut materials, &mut images);

                if config.auto_show {
                    runtime.field.show(config.animation.show_duration);
                }
            }
            FieldEvent::Shown => info!("Particle field visible"),
            FieldEvent::HideStarted(ticket) => debug!("Hide started: {:?}", ticket),
            FieldEvent::HideFinished { destroyed } => {
                info!("Particle field hidden (destroyed: {})", destroyed)
            }
            FieldEvent::Released => {
                if let Some(render) = runtime.render.take() {
                    commands.entity(render.entity).despawn();
                    meshes.remove(&render.mesh);
                    materials.remove(&render.material);
                    images.remove(&render.touch);
                    info!("Particle field resources released");
                }
            }
        }
    }
}

fn spawn_field(
    commands: &mut Commands,
    runtime: &mut FieldRuntime,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ParticleMaterial>,
    images: &mut Assets<Image>,
) {
    let Some(state) = runtime.field.render_state() else {
        return;
    };
    if state.points.is_empty() {
        warn!("Every pixel is at or below the threshold; nothing to draw");
        return;
    }

    let touch = images.add(build_touch_image(state.bitmap));
    let mesh = meshes.add(build_particle_mesh(state.points));
    let material = materials.add(ParticleMaterial {
        params: ParticleUniform::from_render_state(&state),
        image: runtime.image.clone(),
        touch: touch.clone(),
    });

    let entity = commands
        .spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_scale(Vec3::new(state.scale, state.scale, 1.0)),
            ParticleFieldMesh,
        ))
        .id();

    runtime.render = Some(FieldRender {
        entity,
        mesh,
        material,
        touch,
    });
}

/// System: Refit the field to the viewport after a window resize
pub fn refit_on_resize(
    mut resized: MessageReader<WindowResized>,
    config: Res<FieldConfig>,
    mut runtime: ResMut<FieldRuntime>,
    mut transforms: Query<&mut Transform, With<ParticleFieldMesh>>,
) {
    if resized.read().count() == 0 {
        return;
    }

    let Some(scale) = runtime.field.resize(config.camera) else {
        return;
    };
    for mut transform in &mut transforms {
        transform.scale = Vec3::new(scale, scale, 1.0);
    }
}

/// System: Push uniforms and the repainted touch bitmap to the GPU
pub fn sync_field_material(
    mut runtime: ResMut<FieldRuntime>,
    mut materials: ResMut<Assets<ParticleMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let runtime = &mut *runtime;
    let Some(render) = runtime.render.as_ref() else {
        return;
    };
    let upload_touch = runtime.field.take_bitmap_dirty();
    let Some(state) = runtime.field.render_state() else {
        return;
    };

    if let Some(material) = materials.get_mut(&render.material) {
        material.params = ParticleUniform::from_render_state(&state);
    }

    if upload_touch {
        if let Some(touch) = images.get_mut(&render.touch) {
            touch.data = Some(state.bitmap.to_rgba8());
        }
    }
}
