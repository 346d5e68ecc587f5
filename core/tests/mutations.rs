use sd_content_core::{
	domain::{DelegateFolder, LinkRelation},
	error::ContentError,
	infra::event::Event,
	ops::files::RecycleOutcome,
};

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use tracing_test::traced_test;

mod common;

use common::{Harness, HostCall, Op};

#[tokio::test]
#[traced_test]
async fn connect_opens_a_session() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());

	let session_id = harness.core.connect().await.unwrap();

	assert!(!session_id.is_empty());
}

#[tokio::test]
#[traced_test]
async fn rename_moves_the_open_editor_to_the_new_locator() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	let file = harness.file(&my_folder, "draft.sas", "run;").await;
	harness.host.with_open(file.locator(false));
	let mut subscriber = harness.core.subscribe();

	let renamed = harness
		.core
		.mutations()
		.rename(&file, "final.sas")
		.await
		.unwrap();

	assert_eq!(renamed.name, "final.sas");
	assert_eq!(
		harness.host.calls(),
		[
			HostCall::Close(file.locator(false)),
			HostCall::Open(renamed.locator(false)),
		]
	);
	assert_eq!(subscriber.drain(), [Event::TreeChanged]);
}

#[tokio::test]
#[traced_test]
async fn declined_close_aborts_rename_before_any_remote_call() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	let file = harness.file(&my_folder, "draft.sas", "run;").await;
	harness.host.with_open(file.locator(false));
	harness.host.decline_close(file.locator(false));

	let result = harness.core.mutations().rename(&file, "final.sas").await;

	assert!(matches!(result, Err(ContentError::UserAborted(name)) if name == "draft.sas"));
	assert_eq!(harness.repository.calls(Op::Rename), 0);
	assert!(harness.host.is_open_at(&file.locator(false)));
	assert_eq!(harness.child_names(&my_folder).await, ["draft.sas"]);
}

#[tokio::test]
#[traced_test]
async fn declined_read_only_close_reopens_the_closed_editor() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	let file = harness.file(&my_folder, "draft.sas", "run;").await;
	harness.host.with_open(file.locator(false));
	harness.host.with_open(file.locator(true));
	harness.host.decline_close(file.locator(true));

	let result = harness.core.mutations().delete(&file).await;

	assert!(matches!(result, Err(ContentError::UserAborted(_))));
	assert_eq!(harness.repository.calls(Op::Delete), 0);
	assert!(harness.host.is_open_at(&file.locator(false)));
	assert!(harness.host.is_open_at(&file.locator(true)));
}

#[tokio::test]
#[traced_test]
async fn failed_rename_reopens_the_old_locator() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	let file = harness.file(&my_folder, "draft.sas", "run;").await;
	harness.host.with_open(file.locator(false));
	harness.repository.fail(Op::Rename, "draft.sas");

	let result = harness.core.mutations().rename(&file, "final.sas").await;

	assert!(matches!(result, Err(ContentError::Transport(_))));
	assert_eq!(
		harness.host.calls(),
		[
			HostCall::Close(file.locator(false)),
			HostCall::Open(file.locator(false)),
		]
	);
}

#[tokio::test]
async fn renaming_to_the_same_name_does_nothing() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	let file = harness.file(&my_folder, "draft.sas", "run;").await;

	let renamed = harness
		.core
		.mutations()
		.rename(&file, "draft.sas")
		.await
		.unwrap();

	assert_eq!(renamed, file);
	assert_eq!(harness.repository.calls(Op::Rename), 0);
}

#[tokio::test]
#[traced_test]
async fn recycling_closes_editors_for_good_and_announces_the_old_document() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	let file = harness.file(&my_folder, "draft.sas", "run;").await;
	harness.host.with_open(file.locator(false));
	let mut subscriber = harness.core.subscribe();

	let outcome = harness.core.mutations().recycle(&file).await.unwrap();

	let RecycleOutcome::Recycled(recycled) = outcome else {
		panic!("expected the file to be recycled");
	};
	assert!(recycled.is_in_recycle_bin());
	assert_eq!(
		harness.host.calls(),
		[HostCall::Close(file.locator(false))]
	);
	assert_eq!(
		subscriber.drain(),
		[
			Event::ContentChanged {
				locator: file.locator(true)
			},
			Event::TreeChanged,
		]
	);
}

#[tokio::test]
#[traced_test]
async fn restore_round_trip_keeps_name_kind_and_parent() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	let programs = harness.folder(&my_folder, "programs").await;
	let file = harness.file(&programs, "draft.sas", "run;").await;

	let RecycleOutcome::Recycled(recycled) =
		harness.core.mutations().recycle(&file).await.unwrap()
	else {
		panic!("expected the file to be recycled");
	};
	assert_eq!(
		recycled.link(LinkRelation::PreviousParent),
		programs.self_uri()
	);
	assert!(harness.child_names(&programs).await.is_empty());

	let restored = harness.core.mutations().restore(&recycled).await.unwrap();

	assert_eq!(restored.name, file.name);
	assert_eq!(restored.kind, file.kind);
	assert_eq!(restored.parent, file.parent);
	assert_eq!(harness.child_names(&programs).await, ["draft.sas"]);
}

#[tokio::test]
#[traced_test]
async fn empty_trash_reports_partial_failure() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	for name in ["a.sas", "b.sas", "c.sas"] {
		let file = harness.file(&my_folder, name, "run;").await;
		harness.core.mutations().recycle(&file).await.unwrap();
	}
	harness.repository.fail(Op::Delete, "b.sas");
	let mut subscriber = harness.core.subscribe();

	let result = harness.core.mutations().empty_trash().await;

	assert!(matches!(
		result,
		Err(ContentError::BatchIncomplete { failed }) if failed == ["b.sas"]
	));
	let trash = harness.delegate(DelegateFolder::RecycleBin).await;
	assert_eq!(harness.child_names(&trash).await, ["b.sas"]);
	assert_eq!(harness.host.errors(), ["Unable to delete: b.sas"]);
	assert_eq!(subscriber.drain(), [Event::TreeChanged]);
}

#[tokio::test]
#[traced_test]
async fn deleting_a_favorite_keeps_its_target() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	let file = harness.file(&my_folder, "draft.sas", "run;").await;

	let reference = harness.core.mutations().add_favorite(&file).await.unwrap();
	assert!(reference.is_reference());

	harness.core.mutations().delete(&reference).await.unwrap();

	let favorites = harness.delegate(DelegateFolder::Favorites).await;
	assert!(harness.child_names(&favorites).await.is_empty());
	assert_eq!(harness.child_names(&my_folder).await, ["draft.sas"]);
	assert_eq!(harness.repository.calls(Op::Delete), 0);
}

#[tokio::test]
#[traced_test]
async fn moves_only_go_into_folders() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	let programs = harness.folder(&my_folder, "programs").await;
	let file = harness.file(&my_folder, "draft.sas", "run;").await;
	let other = harness.file(&my_folder, "other.sas", "run;").await;

	assert!(matches!(
		harness.core.mutations().move_resource(&file, &other).await,
		Err(ContentError::MoveRejected { name, .. }) if name == "draft.sas"
	));
	assert_eq!(harness.repository.calls(Op::MoveTo), 0);

	let moved = harness
		.core
		.mutations()
		.move_to(&file, programs.self_uri().unwrap())
		.await
		.unwrap();

	assert!(moved.is_child_of(&programs));
	assert_eq!(moved.locator(false), file.locator(false));
	assert_eq!(harness.child_names(&programs).await, ["draft.sas"]);
}

#[tokio::test]
async fn remote_move_rejection_is_a_move_rejection() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	let programs = harness.folder(&my_folder, "programs").await;

	assert!(matches!(
		harness
			.core
			.mutations()
			.move_resource(&my_folder, &programs)
			.await,
		Err(ContentError::MoveRejected { .. })
	));
}

#[tokio::test]
#[traced_test]
async fn declined_close_aborts_restore_before_any_remote_call() {
	let data_dir = tempdir().unwrap();
	let harness = Harness::new(data_dir.path());
	let my_folder = harness.my_folder().await;
	let file = harness.file(&my_folder, "draft.sas", "run;").await;
	let RecycleOutcome::Recycled(recycled) =
		harness.core.mutations().recycle(&file).await.unwrap()
	else {
		panic!("expected the file to be recycled");
	};
	let moves_before = harness.repository.calls(Op::MoveTo);
	harness.host.with_open(recycled.locator(true));
	harness.host.decline_close(recycled.locator(true));

	let result = harness.core.mutations().restore(&recycled).await;

	assert!(matches!(result, Err(ContentError::UserAborted(name)) if name == "draft.sas"));
	assert_eq!(harness.repository.calls(Op::MoveTo), moves_before);
	assert!(harness.host.is_open_at(&recycled.locator(true)));
	let trash = harness.delegate(DelegateFolder::RecycleBin).await;
	assert_eq!(harness.child_names(&trash).await, ["draft.sas"]);
}
