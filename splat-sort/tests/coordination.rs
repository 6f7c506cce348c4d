//! Producer-side scheduling against a live worker.

mod support;

use std::time::Duration;

use glam::{Mat4, Vec3};
use splat_sort::{SortAlgorithm, SortService, SortWorkerHandle};
use support::clouds::*;

#[test]
fn view_updates_while_busy_collapse_into_one_sort() {
    let mut service = SortService::new(SortWorkerHandle::inline());
    service.load(random_cloud(100, 5.0, 1)).unwrap();

    let first = view_projection_from(Vec3::new(0.0, 0.0, 10.0));
    service.observe_view(first);
    assert_eq!(
        service
            .dispatch(first, 100, SortAlgorithm::QuickSort)
            .unwrap(),
        Some(1)
    );

    // Ten frames of camera motion with the first result still unread.
    let mut latest = first;
    for step in 1..=10 {
        let angle = step as f32 * 0.3;
        latest = view_projection_from(Vec3::new(10.0 * angle.sin(), 0.0, 10.0 * angle.cos()));
        service.observe_view(latest);
        assert_eq!(
            service
                .dispatch(latest, 100, SortAlgorithm::QuickSort)
                .unwrap(),
            None
        );
    }

    assert_eq!(service.poll().unwrap().unwrap().sequence, 1);
    assert!(service.coordinator().is_dirty());

    assert_eq!(
        service
            .dispatch(latest, 100, SortAlgorithm::QuickSort)
            .unwrap(),
        Some(2)
    );
    assert_eq!(service.poll().unwrap().unwrap().sequence, 2);

    service.observe_view(latest);
    assert_eq!(
        service
            .dispatch(latest, 100, SortAlgorithm::QuickSort)
            .unwrap(),
        None
    );
}

#[test]
fn sliding_along_the_view_axis_does_not_resort() {
    let mut service = SortService::new(SortWorkerHandle::inline());
    service.load(line_cloud(&[1.0, 2.0, 3.0])).unwrap();

    service.observe_view(Mat4::IDENTITY);
    service
        .dispatch(Mat4::IDENTITY, 3, SortAlgorithm::CountingSort)
        .unwrap();
    service.poll().unwrap();

    for z in 1..20 {
        let moved = Mat4::from_translation(Vec3::new(0.0, 0.0, z as f32));
        assert!(!service.observe_view(moved));
        assert_eq!(
            service
                .dispatch(moved, 3, SortAlgorithm::CountingSort)
                .unwrap(),
            None
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn threaded_worker_delivers_each_dispatch() {
    let mut service = SortService::new(SortWorkerHandle::spawn_thread().unwrap());
    service.load(random_cloud(10_000, 20.0, 9)).unwrap();

    let views = random_views(5, 17);
    let mut completed = 0;
    for view in &views {
        service.mark_dirty();
        service.observe_view(*view);
        service
            .dispatch(*view, 10_000, SortAlgorithm::CountingSort)
            .unwrap();

        let mut result = None;
        for _ in 0..500 {
            result = service.poll().unwrap();
            if result.is_some() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        let result = result.expect("worker answered within five seconds");
        assert_eq!(result.len(), 10_000);
        completed += 1;
        assert!(!service.is_busy());
    }
    assert_eq!(completed, views.len());
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn empty_scene_still_answers() {
    let mut service = SortService::new(SortWorkerHandle::spawn_thread().unwrap());

    service
        .dispatch(Mat4::IDENTITY, 10, SortAlgorithm::Comparator)
        .unwrap();
    let mut answered = false;
    for _ in 0..500 {
        match service.poll() {
            Ok(Some(result)) => {
                assert!(result.is_empty());
                answered = true;
                break;
            }
            Ok(None) => std::thread::sleep(Duration::from_millis(10)),
            Err(err) => panic!("{err}"),
        }
    }
    assert!(answered);
}
