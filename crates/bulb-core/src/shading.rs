//! Surface lighting, glow and display conversion for traced rays.

use crate::audio::AudioEnergy;
use crate::constants::*;
use crate::dimension::BulbPoint;
use crate::march::{Ray, Scene};
use glam::{Vec2, Vec3};

/// Linear RGB.
pub type Color = Vec3;

const PALETTE: [Vec3; 4] = [
    Vec3::new(0.1, 0.9, 0.4), // green-cyan
    Vec3::new(1.0, 0.3, 0.7), // pink-magenta
    Vec3::new(1.0, 0.9, 0.1), // yellow
    Vec3::new(0.3, 0.7, 1.0), // light blue
];

// Linear colours above this are treated as runaway values.
const COLOR_CEILING: f32 = 64.0;

/// Four-colour psychedelic blend driven by `t`, position, colour shift and audio.
pub fn palette(t: f32, pos: Vec3, color_shift: f32, time: f32, audio: AudioEnergy) -> Color {
    let m1 = (t * 5.0 + color_shift + time * 0.5).sin() * 0.5 + 0.5;
    let m2 = (t * 3.0 + pos.x * 2.0).cos() * 0.5 + 0.5;
    let m3 = (pos.y * 3.0 + pos.z * 2.0).sin() * 0.5 + 0.5;

    let mut color = PALETTE[0].lerp(PALETTE[1], m1);
    color = color.lerp(PALETTE[2], m2);
    color = color.lerp(PALETTE[3], m3);

    color *= 1.0 + audio.level * 0.5;
    color + Vec3::new(audio.bass, audio.mid, audio.treble) * 0.3
}

#[inline]
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

fn scene_palette<P: BulbPoint>(scene: &Scene<P>, t: f32, pos: Vec3) -> Color {
    palette(
        t,
        pos,
        scene.appearance.color_shift,
        scene.modulation.time,
        scene.modulation.effective_audio(),
    )
}

/// Ambient + diffuse + specular + fresnel rim + sub-surface, with optional soft shadow and
/// ambient occlusion.
pub fn shade_hit<P: BulbPoint>(scene: &Scene<P>, ray: &Ray, position: Vec3, steps: u32) -> Color {
    let field = |p: Vec3| scene.field(p);
    let normal = scene.normal(position);
    let light_dir = (LIGHT_POSITION - position)
        .try_normalize()
        .unwrap_or(Vec3::Y);
    let view = -ray.direction;

    let diff = normal.dot(light_dir).max(0.0);
    let specular = reflect(-light_dir, normal)
        .dot(view)
        .max(0.0)
        .powf(SPECULAR_EXPONENT);
    let fresnel = (1.0 - normal.dot(view).max(0.0)).powi(2);
    let sss = normal.dot(-light_dir).max(0.0).powi(3);

    let shadow = if scene.appearance.soft_shadows {
        let eps = scene.march.surface_epsilon;
        soft_shadow(field, position + normal * eps * 2.0, light_dir, 0.02, 10.0, SHADOW_SOFTNESS)
    } else {
        1.0
    };
    let occlusion = if scene.appearance.ambient_occlusion {
        ambient_occlusion(field, position, normal)
    } else {
        1.0
    };

    let t = steps as f32 / scene.march.max_steps.max(1) as f32;
    let base = scene_palette(scene, t, position);
    let audio = scene.modulation.effective_audio();

    let mut color = base * (AMBIENT_WEIGHT + diff * DIFFUSE_WEIGHT * shadow * occlusion);
    color += Vec3::ONE * specular * SPECULAR_WEIGHT * shadow;
    color += base * fresnel * FRESNEL_WEIGHT;
    color += base * sss * SUBSURFACE_WEIGHT;
    color += base * audio.level * scene.appearance.glow_intensity * 0.5;
    color
}

/// Miss colour: dark backdrop plus a glow that fades with the number of steps taken.
pub fn background<P: BulbPoint>(scene: &Scene<P>, steps: u32) -> Color {
    let glow = (-(steps as f32) * 0.01).exp() * scene.appearance.glow_intensity;
    BACKGROUND_COLOR + scene_palette(scene, scene.modulation.time * 0.1, Vec3::ZERO) * glow * 0.2
}

/// Glow proportional to how hard the march had to work; rays grazing the surface light up.
pub fn step_glow<P: BulbPoint>(scene: &Scene<P>, steps: u32) -> Color {
    let s = steps as f32 / scene.march.max_steps.max(1) as f32;
    scene_palette(scene, s, Vec3::ZERO) * s * scene.appearance.glow_intensity * 0.3
}

/// Penumbra factor in `[0, 1]` along `rd` from `ro` (1 = fully lit).
pub fn soft_shadow<F>(field: F, ro: Vec3, rd: Vec3, min_t: f32, max_t: f32, k: f32) -> f32
where
    F: Fn(Vec3) -> f32,
{
    let mut res = 1.0_f32;
    let mut t = min_t;
    for _ in 0..SHADOW_STEPS {
        let h = field(ro + rd * t);
        if h.is_nan() {
            break;
        }
        res = res.min(k * h / t);
        t += h.clamp(0.001, 0.1);
        if h < 1.0e-4 || t > max_t {
            break;
        }
    }
    res.clamp(0.0, 1.0)
}

/// Five-tap occlusion estimate along the normal (1 = unoccluded).
pub fn ambient_occlusion<F>(field: F, p: Vec3, normal: Vec3) -> f32
where
    F: Fn(Vec3) -> f32,
{
    let mut occ = 0.0_f32;
    let mut scale = 1.0_f32;
    for i in 0..OCCLUSION_TAPS {
        let h = 0.01 + 0.12 * i as f32 / (OCCLUSION_TAPS - 1) as f32;
        let d = field(p + normal * h);
        if d.is_finite() {
            occ += (h - d) * scale;
        }
        scale *= 0.95;
    }
    (1.0 - 3.0 * occ).clamp(0.0, 1.0)
}

/// Replace NaN/infinite channels with 0 and keep the rest within `[0, COLOR_CEILING]`.
pub fn sanitize(color: Color) -> Color {
    let fix = |c: f32| {
        if c.is_finite() {
            c.clamp(0.0, COLOR_CEILING)
        } else {
            0.0
        }
    };
    Vec3::new(fix(color.x), fix(color.y), fix(color.z))
}

/// Vignette, bass colour push, Reinhard tone mapping and gamma. `uv` is the centred screen
/// coordinate used to build the ray.
pub fn post_process(color: Color, uv: Vec2, audio: AudioEnergy) -> Color {
    let mut c = sanitize(color);
    c *= (1.0 - uv.length() * 0.3).max(0.0);
    if audio.bass > 0.5 {
        c.x *= 1.0 + audio.bass * 0.1;
        c.z *= 1.0 - audio.bass * 0.1;
    }
    c = c / (c + Vec3::ONE);
    let g = 1.0 / 2.2;
    sanitize(Vec3::new(c.x.powf(g), c.y.powf(g), c.z.powf(g))).min(Vec3::ONE)
}

/// Quantize a display colour (already in `[0, 1]`) to RGBA8.
pub fn to_rgba8(color: Color) -> [u8; 4] {
    let q = |c: f32| (sanitize_unit(c) * 255.0 + 0.5) as u8;
    [q(color.x), q(color.y), q(color.z), 255]
}

#[inline]
fn sanitize_unit(c: f32) -> f32 {
    if c.is_finite() {
        c.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
