use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use ve_asset::obj::LoadError;
use ve_viewer::prelude::*;
use ve_viewer::renderer::HeadlessBackend;
use ve_viewer::scene::{SceneError, SceneResult};

fn park() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join("park")
}

fn descriptor(source: &str) -> SceneDescriptor {
    match toml::from_str(source) {
        Ok(descriptor) => descriptor,
        Err(err) => panic!("test descriptor does not parse: {}", err),
    }
}

#[test]
fn test_park_scene_builds() -> SceneResult<()> {
    let mut backend = HeadlessBackend::new();
    let scene = Scene::load(&park().join("scene.toml"), &mut backend)?;

    assert_eq!(backend.mesh_uploads(), 5);
    assert_eq!(backend.texture_uploads(), 4);
    assert_eq!(scene.objects().len(), 13);
    assert_eq!(scene.drawables().count(), 13);
    assert_eq!(scene.camera_start(), Vec3::new(0.0, 2.0, 6.0));

    let counts: Vec<u32> = scene.objects().iter().map(|o| o.vertex_count).collect();
    assert_eq!(counts, vec![6, 18, 18, 18, 18, 18, 6, 12, 3, 12, 3, 12, 3]);

    for object in scene.objects() {
        assert_eq!(backend.mesh_vertices(object.mesh), Some(object.vertex_count as usize));
    }

    let bench = scene.objects()[6];
    assert_relative_eq!(bench.rotation, std::f32::consts::PI, epsilon = 1e-6);
    assert_eq!(
        backend.texture_path(bench.texture),
        Some(park().join("colormap.png").as_path())
    );
    Ok(())
}

#[test]
fn test_walking_through_the_park() -> SceneResult<()> {
    let mut backend = HeadlessBackend::new();
    let scene = Scene::load(&park().join("scene.toml"), &mut backend)?;
    let mut game_loop = GameLoop::new(scene, ViewerConfig::default());

    let mut input = Input::default();
    input.key_named("W", true);
    for _ in 0..60 {
        game_loop.update(&input.snapshot(), 1.0 / 60.0);
    }
    assert!(game_loop
        .camera()
        .position()
        .abs_diff_eq(Vec3::new(0.0, 2.0, 1.0), 1e-3));

    // look around: lock, then turn right by 10 degrees
    input.key_named("W", false);
    input.set_look_button(true);
    input.cursor_moved(640.0, 360.0);
    let frame = game_loop.update(&input.snapshot(), 1.0 / 60.0);
    assert_eq!(frame.cursor, Some(CursorCommand::Capture));
    assert_eq!(frame.draws.len(), 13);

    input.cursor_moved(740.0, 360.0);
    game_loop.update(&input.snapshot(), 1.0 / 60.0);
    assert_relative_eq!(game_loop.camera().yaw(), -80.0, epsilon = 1e-4);

    input.set_look_button(false);
    let frame = game_loop.update(&input.snapshot(), 1.0 / 60.0);
    assert_eq!(frame.cursor, Some(CursorCommand::Release));
    Ok(())
}

#[test]
fn test_unknown_references_are_reported() {
    let scene = descriptor(
        r#"
        [[mesh]]
        id = "ground"
        path = "ground.obj"

        [[texture]]
        id = "ground"
        path = "ground.png"

        [[object]]
        mesh = "ground"
        texture = "grass"
        position = [0.0, 0.0, 0.0]
        "#,
    );

    match Scene::build(&scene, &park(), &mut HeadlessBackend::new()) {
        Err(SceneError::UnknownReference { index, kind, id }) => {
            assert_eq!(index, 0);
            assert_eq!(kind, "texture");
            assert_eq!(id, "grass");
        }
        other => panic!("expected unknown reference, got {:?}", other),
    }
}

#[test]
fn test_duplicate_mesh_id() {
    let scene = descriptor(
        r#"
        [[mesh]]
        id = "prop"
        path = "bench.obj"

        [[mesh]]
        id = "prop"
        path = "fence.obj"
        "#,
    );

    assert!(matches!(
        Scene::build(&scene, &park(), &mut HeadlessBackend::new()),
        Err(SceneError::DuplicateId { kind: "mesh", .. })
    ));
}

#[test]
fn test_missing_material_and_file() {
    let scene = descriptor(
        r#"
        [[mesh]]
        id = "lid"
        path = "barrels.obj"
        material = "lid"
        "#,
    );
    assert!(matches!(
        Scene::build(&scene, &park(), &mut HeadlessBackend::new()),
        Err(SceneError::MissingMaterial { .. })
    ));

    let scene = descriptor(
        r#"
        [[mesh]]
        id = "statue"
        path = "statue.obj"
        "#,
    );
    match Scene::build(&scene, &park(), &mut HeadlessBackend::new()) {
        Err(SceneError::Load {
            id,
            source: LoadError::ResourceUnavailable { .. },
        }) => assert_eq!(id, "statue"),
        other => panic!("expected unavailable mesh, got {:?}", other),
    }
}

#[test]
fn test_faceless_mesh_is_kept_but_not_drawn() -> SceneResult<()> {
    let scene = descriptor(
        r#"
        [[mesh]]
        id = "empty"
        path = "empty.obj"

        [[texture]]
        id = "atlas"
        path = "colormap.png"

        [[object]]
        mesh = "empty"
        texture = "atlas"
        position = [0.0, 0.0, 0.0]
        "#,
    );
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");

    let mut backend = HeadlessBackend::new();
    let scene = Scene::build(&scene, &fixtures, &mut backend)?;

    assert_eq!(scene.objects().len(), 1);
    assert_eq!(scene.objects()[0].vertex_count, 0);
    assert_eq!(scene.drawables().count(), 0);
    assert_eq!(backend.mesh_vertices(scene.objects()[0].mesh), Some(0));

    let mut game_loop = GameLoop::new(scene, ViewerConfig::default());
    assert!(game_loop.update(&InputSnapshot::default(), 0.0).draws.is_empty());
    Ok(())
}
