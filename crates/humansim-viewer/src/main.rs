//! HumanSim Viewer - Bevy-based visualization for the simulation
//!
//! Usage: `humansim-viewer [config.json]`
//!
//! Controls:
//! - Space: pause / resume
//! - `=` / `-`: double / halve simulation speed
//! - R: drop a fresh batch of plants and animals
//! - H: spawn a human at the cursor
//! - Left click: inspect a human
//! - Scroll: zoom, middle or right drag: pan

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use humansim_core::components::{
    Gender, Human, LifeState, Needs, Position, Targets, Vec2 as SimVec2,
};
use humansim_core::config::WorldConfig;
use humansim_core::engine::SimulationEngine;
use humansim_core::snapshot::{PuddleView, TickReport, WorldSnapshot};

/// Simulation steps per second
const STEP_HZ: f64 = 60.0;
const MAX_SPEED: u32 = 32;
const HUMAN_RADIUS: f32 = 5.0;
const CLICK_RADIUS: f32 = 12.0;

fn main() {
    let config = load_config();
    let engine = match SimulationEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid world config ({}), using defaults", e);
            match SimulationEngine::new(WorldConfig::default()) {
                Ok(engine) => engine,
                Err(e) => {
                    eprintln!("Failed to create simulation: {}", e);
                    return;
                }
            }
        }
    };
    let bounds = engine.bounds();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "HumanSim - Life Simulation".to_string(),
                resolution: (bounds.width + 240.0, bounds.height + 80.0).into(),
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(Time::<Fixed>::from_hz(STEP_HZ))
        .insert_resource(SimWrapper(engine))
        .insert_resource(LatestSnapshot(None))
        .insert_resource(CameraState::default())
        .insert_resource(ViewerConfig::default())
        .insert_resource(SessionTotals::default())
        .insert_resource(SelectedHuman(None))
        .add_systems(Startup, setup)
        .add_systems(FixedUpdate, step_simulation)
        .add_systems(
            Update,
            (
                simulation_controls,
                camera_controls,
                handle_click,
                render_bounds,
                render_resources,
                render_humans,
                render_selection,
                update_text_ui,
            ),
        )
        .run();
}

/// Config path from the first CLI argument; any failure falls back to defaults
fn load_config() -> WorldConfig {
    let Some(path) = std::env::args().nth(1) else {
        return WorldConfig::default();
    };
    match WorldConfig::from_path(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {}, using defaults", path, e);
            WorldConfig::default()
        }
    }
}

#[derive(Resource)]
struct SimWrapper(SimulationEngine);

/// World state as of the last simulation step
#[derive(Resource)]
struct LatestSnapshot(Option<WorldSnapshot>);

#[derive(Resource)]
struct SelectedHuman(Option<hecs::Entity>);

#[derive(Resource)]
struct CameraState {
    target: Vec2,
    zoom: f32,
    dragging: bool,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            target: Vec2::new(100.0, 0.0),
            zoom: 1.0,
            dragging: false,
        }
    }
}

#[derive(Resource)]
struct ViewerConfig {
    paused: bool,
    /// Simulation steps per fixed tick
    speed: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            paused: false,
            speed: 1,
        }
    }
}

/// Running totals since the viewer started
#[derive(Resource, Default)]
struct SessionTotals {
    births: u32,
    deaths: u32,
    eaten: u32,
}

impl SessionTotals {
    fn add(&mut self, report: &TickReport) {
        self.births += report.births;
        self.deaths += report.deaths.len() as u32;
        self.eaten += report.animals_eaten + report.plants_eaten;
    }
}

// Marker components for text UI elements
#[derive(Component)]
struct HudText;

#[derive(Component)]
struct InspectText;

#[derive(Component)]
struct ExtinctBanner;

/// Simulation coordinates run y-down from the top-left corner; the scene is
/// y-up and centred on the world
fn to_screen(point: SimVec2, sim: &SimulationEngine) -> Vec2 {
    let bounds = sim.bounds();
    Vec2::new(point.x - bounds.width / 2.0, bounds.height / 2.0 - point.y)
}

fn to_sim(point: Vec2, sim: &SimulationEngine) -> SimVec2 {
    let bounds = sim.bounds();
    SimVec2::new(point.x + bounds.width / 2.0, bounds.height / 2.0 - point.y)
}

fn setup(mut commands: Commands, mut sim: ResMut<SimWrapper>, mut latest: ResMut<LatestSnapshot>) {
    commands.spawn(Camera2d::default());

    sim.0.generate();
    latest.0 = Some(sim.0.snapshot());

    commands.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::WHITE),
        bevy::sprite::Anchor::TopLeft,
        Transform::from_xyz(0.0, 0.0, 100.0),
        HudText,
    ));

    commands.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 0.6, 0.95)),
        bevy::sprite::Anchor::TopLeft,
        Transform::from_xyz(0.0, 0.0, 100.0),
        InspectText,
    ));

    commands.spawn((
        Text2d::new("EXTINCT"),
        TextFont {
            font_size: 48.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.2, 0.2)),
        Transform::from_xyz(0.0, 0.0, 110.0),
        Visibility::Hidden,
        ExtinctBanner,
    ));

    let config = sim.0.config();
    info!(
        "Generated {}x{} world with {} humans, {} puddles, {} plants, {} animals",
        config.width,
        config.height,
        sim.0.human_count(),
        sim.0.puddle_count(),
        sim.0.plant_count(),
        sim.0.animal_count()
    );
}

fn step_simulation(
    viewer_config: Res<ViewerConfig>,
    mut sim: ResMut<SimWrapper>,
    mut totals: ResMut<SessionTotals>,
    mut latest: ResMut<LatestSnapshot>,
) {
    if viewer_config.paused {
        return;
    }
    for _ in 0..viewer_config.speed {
        let report = sim.0.step();
        totals.add(&report);
    }
    latest.0 = Some(sim.0.snapshot());
}

fn simulation_controls(
    keyboard: Res<ButtonInput<KeyCode>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut viewer_config: ResMut<ViewerConfig>,
    mut sim: ResMut<SimWrapper>,
    mut latest: ResMut<LatestSnapshot>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        viewer_config.paused = !viewer_config.paused;
    }
    if keyboard.just_pressed(KeyCode::Equal) || keyboard.just_pressed(KeyCode::NumpadAdd) {
        viewer_config.speed = (viewer_config.speed * 2).min(MAX_SPEED);
    }
    if keyboard.just_pressed(KeyCode::Minus) || keyboard.just_pressed(KeyCode::NumpadSubtract) {
        viewer_config.speed = (viewer_config.speed / 2).max(1);
    }

    let mut changed = false;

    if keyboard.just_pressed(KeyCode::KeyR) {
        let (plants, animals) = {
            let config = sim.0.config();
            (config.respawn_plants, config.respawn_animals)
        };
        sim.0.spawn_resources(plants, animals);
        changed = true;
    }

    if keyboard.just_pressed(KeyCode::KeyH) {
        if let Some(cursor) = cursor_world_position(&camera_query, &window_query) {
            let at = to_sim(cursor, &sim.0);
            sim.0.spawn_human_at(at);
            info!("Spawned human at ({:.0}, {:.0})", at.x, at.y);
            changed = true;
        }
    }

    if changed {
        latest.0 = Some(sim.0.snapshot());
    }
}

fn cursor_world_position(
    camera_query: &Query<(&Camera, &GlobalTransform)>,
    window_query: &Query<&Window, With<PrimaryWindow>>,
) -> Option<Vec2> {
    let window = window_query.get_single().ok()?;
    let cursor_pos = window.cursor_position()?;
    let (camera, camera_transform) = camera_query.get_single().ok()?;
    camera.viewport_to_world_2d(camera_transform, cursor_pos).ok()
}

fn camera_controls(
    mut camera_state: ResMut<CameraState>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut scroll_events: EventReader<MouseWheel>,
    mut motion_events: EventReader<MouseMotion>,
) {
    let zoom_speed = 0.1;

    // Mouse drag
    camera_state.dragging =
        mouse_buttons.pressed(MouseButton::Middle) || mouse_buttons.pressed(MouseButton::Right);

    if camera_state.dragging {
        for motion in motion_events.read() {
            camera_state.target.x -= motion.delta.x * camera_state.zoom;
            camera_state.target.y += motion.delta.y * camera_state.zoom;
        }
    } else {
        motion_events.clear();
    }

    // Scroll zoom
    for scroll in scroll_events.read() {
        camera_state.zoom *= 1.0 - scroll.y * zoom_speed;
        camera_state.zoom = camera_state.zoom.clamp(0.2, 5.0);
    }

    if let Ok(mut transform) = camera_query.get_single_mut() {
        transform.translation.x = camera_state.target.x;
        transform.translation.y = camera_state.target.y;
        transform.scale = Vec3::splat(camera_state.zoom);
    }
}

fn handle_click(
    sim: Res<SimWrapper>,
    latest: Res<LatestSnapshot>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut selected: ResMut<SelectedHuman>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(world_pos) = cursor_world_position(&camera_query, &window_query) else {
        return;
    };
    let Some(snapshot) = &latest.0 else {
        return;
    };

    // Find human closest to click
    let mut closest: Option<(u64, f32)> = None;

    for human in &snapshot.humans {
        let dist = to_screen(human.position, &sim.0).distance_squared(world_pos);
        if dist < CLICK_RADIUS * CLICK_RADIUS && closest.map_or(true, |(_, best)| dist < best) {
            closest = Some((human.id, dist));
        }
    }

    selected.0 = closest.and_then(|(id, _)| hecs::Entity::from_bits(id));
}

fn render_bounds(sim: Res<SimWrapper>, mut gizmos: Gizmos) {
    let bounds = sim.0.bounds();
    gizmos.rect_2d(
        Isometry2d::IDENTITY,
        Vec2::new(bounds.width, bounds.height),
        Color::srgba(0.4, 0.4, 0.5, 0.8),
    );
}

/// Puddles are centred on their position, the same point drinking reach is
/// measured to. Returns the ellipse centre and half extents.
fn puddle_ellipse(puddle: &PuddleView, sim: &SimulationEngine) -> (Vec2, Vec2) {
    (
        to_screen(puddle.position, sim),
        Vec2::new(puddle.width / 2.0, puddle.height / 2.0),
    )
}

fn render_resources(sim: Res<SimWrapper>, latest: Res<LatestSnapshot>, mut gizmos: Gizmos) {
    let Some(snapshot) = &latest.0 else {
        return;
    };

    for puddle in &snapshot.puddles {
        let (centre, half_size) = puddle_ellipse(puddle, &sim.0);
        gizmos.ellipse_2d(
            Isometry2d::from_translation(centre),
            half_size,
            Color::srgb(0.2, 0.4, 0.9),
        );
    }

    for &plant in &snapshot.plants {
        gizmos.circle_2d(
            Isometry2d::from_translation(to_screen(plant, &sim.0)),
            3.0,
            Color::srgb(0.2, 0.8, 0.3),
        );
    }

    for &animal in &snapshot.animals {
        gizmos.circle_2d(
            Isometry2d::from_translation(to_screen(animal, &sim.0)),
            4.0,
            Color::srgb(0.6, 0.4, 0.2),
        );
    }
}

fn render_humans(sim: Res<SimWrapper>, latest: Res<LatestSnapshot>, mut gizmos: Gizmos) {
    let Some(snapshot) = &latest.0 else {
        return;
    };

    for human in &snapshot.humans {
        let pos = to_screen(human.position, &sim.0);

        let alpha = if human.asleep { 0.4 } else { 1.0 };
        let color = match human.gender {
            Gender::Male => Color::srgba(0.3, 0.5, 0.95, alpha),
            Gender::Female => Color::srgba(0.95, 0.4, 0.7, alpha),
        };
        gizmos.circle_2d(Isometry2d::from_translation(pos), HUMAN_RADIUS, color);

        // Need bars above the head: water, hunger, energy
        let bar_width = 16.0;
        let bar_height = 2.0;
        let needs = human.needs;
        let bars = [
            (needs.water, Color::srgb(0.2, 0.5, 1.0)),
            (needs.hunger, Color::srgb(0.9, 0.6, 0.2)),
            (needs.energy, Color::srgb(1.0, 0.9, 0.3)),
        ];
        for (i, (level, color)) in bars.into_iter().enumerate() {
            draw_need_bar(
                &mut gizmos,
                pos + Vec2::new(0.0, HUMAN_RADIUS + 4.0 + i as f32 * 3.0),
                bar_width,
                bar_height,
                level / 100.0,
                color,
            );
        }
    }
}

fn render_selection(sim: Res<SimWrapper>, selected: Res<SelectedHuman>, mut gizmos: Gizmos) {
    let Some(entity) = selected.0 else { return };

    let Ok(pos) = sim.0.world.get::<&Position>(entity) else {
        return;
    };
    let pos_vec = to_screen(pos.0, &sim.0);

    gizmos.circle_2d(
        Isometry2d::from_translation(pos_vec),
        HUMAN_RADIUS * 2.0,
        Color::srgba(1.0, 1.0, 0.2, 1.0),
    );

    // Line to whatever the human is heading for
    if let Ok(targets) = sim.0.world.get::<&Targets>(entity) {
        let target = targets
            .mate
            .or(targets.animal)
            .or(targets.plant)
            .or(targets.puddle);
        if let Some(target) = target {
            if let Ok(target_pos) = sim.0.world.get::<&Position>(target) {
                gizmos.line_2d(
                    pos_vec,
                    to_screen(target_pos.0, &sim.0),
                    Color::srgba(1.0, 1.0, 0.3, 0.5),
                );
            }
        }
    }
}

fn draw_need_bar(
    gizmos: &mut Gizmos,
    pos: Vec2,
    width: f32,
    height: f32,
    level: f32,
    color: Color,
) {
    // Background
    gizmos.rect_2d(
        Isometry2d::from_translation(pos),
        Vec2::new(width, height),
        Color::srgba(0.2, 0.2, 0.25, 0.8),
    );

    // Fill based on level
    let fill_width = width * level.clamp(0.0, 1.0);
    if fill_width > 0.1 {
        gizmos.rect_2d(
            Isometry2d::from_translation(pos - Vec2::new((width - fill_width) / 2.0, 0.0)),
            Vec2::new(fill_width, height),
            color,
        );
    }
}

fn describe_human(sim: &SimulationEngine, entity: hecs::Entity) -> Option<String> {
    let human = *sim.world.get::<&Human>(entity).ok()?;
    let needs = *sim.world.get::<&Needs>(entity).ok()?;
    let state = match *sim.world.get::<&LifeState>(entity).ok()? {
        LifeState::Awake => "awake".to_string(),
        LifeState::Asleep { ticks } => format!("asleep ({} ticks)", ticks),
        LifeState::Dead(cause) => format!("dead ({:?})", cause),
    };
    Some(format!(
        "{:?}, generation {}\nAge {} / {}\nWater {:.1}\nHunger {:.1}\nEnergy {:.1}\n{}",
        human.gender,
        human.generation,
        human.age,
        human.death_age,
        needs.water,
        needs.hunger,
        needs.energy,
        state
    ))
}

#[allow(clippy::type_complexity)]
fn update_text_ui(
    sim: Res<SimWrapper>,
    viewer_config: Res<ViewerConfig>,
    totals: Res<SessionTotals>,
    camera_state: Res<CameraState>,
    mut selected: ResMut<SelectedHuman>,
    mut hud_query: Query<
        (&mut Text2d, &mut Transform),
        (With<HudText>, Without<InspectText>, Without<ExtinctBanner>),
    >,
    mut inspect_query: Query<
        (&mut Text2d, &mut Transform),
        (With<InspectText>, Without<HudText>, Without<ExtinctBanner>),
    >,
    mut banner_query: Query<
        (&mut Visibility, &mut Transform),
        (With<ExtinctBanner>, Without<HudText>, Without<InspectText>),
    >,
) {
    let bounds = sim.0.bounds();
    let zoom = camera_state.zoom;
    let panel_x = camera_state.target.x + (bounds.width / 2.0 - 90.0) * zoom;
    let panel_top = camera_state.target.y + (bounds.height / 2.0 + 30.0) * zoom;

    let stats = sim.0.stats();
    let status = if viewer_config.paused {
        "PAUSED".to_string()
    } else {
        format!("x{}", viewer_config.speed)
    };

    for (mut text, mut transform) in &mut hud_query {
        **text = format!(
            "Tick {}\n{:.1} s  {}\n\nHumans {}\n  asleep {}\n  max gen {}\nAnimals {}\nPlants {}\nPuddles {}\n\nBirths {}\nDeaths {}\nEaten {}",
            sim.0.tick(),
            sim.0.elapsed_ms() / 1000.0,
            status,
            stats.humans,
            stats.asleep,
            stats.max_generation,
            stats.animals,
            stats.plants,
            stats.puddles,
            totals.births,
            totals.deaths,
            totals.eaten,
        );
        // Keep text at fixed screen position relative to camera
        transform.translation.x = panel_x;
        transform.translation.y = panel_top;
        transform.scale = Vec3::splat(zoom);
    }

    // Deselect humans who have died and been removed
    let description = selected.0.and_then(|entity| describe_human(&sim.0, entity));
    if description.is_none() {
        selected.0 = None;
    }

    for (mut text, mut transform) in &mut inspect_query {
        **text = description.clone().unwrap_or_default();
        transform.translation.x = panel_x;
        transform.translation.y = panel_top - 250.0 * zoom;
        transform.scale = Vec3::splat(zoom);
    }

    for (mut visibility, mut transform) in &mut banner_query {
        *visibility = if sim.0.is_extinct() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        transform.translation.x = camera_state.target.x - 100.0 * zoom;
        transform.translation.y = camera_state.target.y;
        transform.scale = Vec3::splat(zoom);
    }
}
