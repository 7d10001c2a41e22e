use super::*;
use crate::view::Banner;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn loaded_colleges(colleges: &[&str]) -> NavigationController {
    let mut controller = NavigationController::new();
    let request = controller.open_colleges();
    assert!(controller.apply(
        request.ticket,
        Ok(DirectoryPayload::Colleges(strings(colleges)))
    ));
    controller
}

fn loaded_branches(college: &str, branches: &[&str]) -> NavigationController {
    let mut controller = loaded_colleges(&[college]);
    let request = controller.select_college(college);
    assert!(controller.apply(
        request.ticket,
        Ok(DirectoryPayload::Branches(strings(branches)))
    ));
    controller
}

#[test]
fn starts_at_colleges_with_nothing_selected() {
    let mut controller = NavigationController::new();
    assert_eq!(controller.level(), Level::Colleges);

    let request = controller.open_colleges();
    assert_eq!(request.target, FetchTarget::Colleges);
    assert_eq!(
        controller.view().banner,
        Some(Banner::Loading("Loading colleges...".into()))
    );
}

#[test]
fn lords_filter_yields_exactly_one_card() {
    let mut controller = loaded_colleges(&[
        "Deccan College of Engineering and Technology",
        "Lords Institute",
    ]);
    controller.set_filter("lords");
    let view = controller.view();
    assert_eq!(view.card_titles(), vec!["Lords Institute"]);
    assert_eq!(
        view.action_at(0),
        Some(Some(NavAction::SelectCollege {
            college: "Lords Institute".into()
        }))
    );
}

#[test]
fn selecting_college_resets_branch_before_requesting() {
    let mut controller = loaded_branches("MJCET", &["CSE", "IT"]);
    let request = controller.select_branch("CSE").expect("select branch");
    controller.apply(request.ticket, Ok(DirectoryPayload::Alumni(Vec::new())));
    assert_eq!(controller.level(), Level::Alumni);

    let request = controller.select_college("Lords Institute");
    assert_eq!(controller.selection().branch(), None);
    assert_eq!(controller.selection().college(), Some("Lords Institute"));
    assert_eq!(
        request.target,
        FetchTarget::Branches {
            college: "Lords Institute".into()
        }
    );
}

#[test]
fn branch_requires_a_college() {
    let mut controller = NavigationController::new();
    assert_eq!(
        controller.select_branch("CSE"),
        Err(NavigationError::NoCollegeSelected)
    );
    assert_eq!(controller.selection().branch(), None);
    assert_eq!(controller.back(), Err(NavigationError::AtTopLevel));
}

#[test]
fn returning_to_colleges_clears_both_selections() {
    let mut controller = loaded_branches("MJCET", &["CSE"]);
    controller.select_branch("CSE").expect("select branch");

    let request = controller
        .dispatch(NavAction::OpenColleges)
        .expect("open colleges");
    assert_eq!(request.target, FetchTarget::Colleges);
    assert_eq!(controller.selection(), &Selection::default());
    assert_eq!(controller.level(), Level::Colleges);
}

#[test]
fn back_from_alumni_refetches_branches_of_same_college() {
    let mut controller = loaded_branches("MJCET", &["CSE"]);
    controller.select_branch("CSE").expect("select branch");

    let request = controller.back().expect("back");
    assert_eq!(
        request.target,
        FetchTarget::Branches {
            college: "MJCET".into()
        }
    );
    assert_eq!(controller.level(), Level::Branches);

    let request = controller.back().expect("back again");
    assert_eq!(request.target, FetchTarget::Colleges);
}

#[test]
fn branch_filter_without_match_equals_unfiltered_plus_warning() {
    let mut controller = loaded_branches("MJCET", &["CSE", "ECE"]);
    let unfiltered = controller.view();

    controller.set_filter("xyz");
    let fallback = controller.view();
    assert_eq!(fallback.cards, unfiltered.cards);
    assert_eq!(unfiltered.banner, None);
    assert_eq!(
        fallback.banner,
        Some(Banner::Warning(
            "No branches found matching \"xyz\". Showing all branches instead.".into()
        ))
    );
}

#[test]
fn alumni_filter_without_match_equals_unfiltered_plus_warning() {
    let mut controller = loaded_branches("MJCET", &["CSE"]);
    let request = controller.select_branch("CSE").expect("select branch");
    controller.apply(
        request.ticket,
        Ok(DirectoryPayload::Alumni(vec![
            AlumniRecord::new("A").with_bio("robotics"),
            AlumniRecord::new("B").with_bio("cloud infrastructure"),
        ])),
    );
    let unfiltered = controller.view();

    controller.set_filter("quantum");
    let fallback = controller.view();
    assert_eq!(fallback.cards, unfiltered.cards);
    assert_eq!(fallback.card_titles(), vec!["A", "B"]);
    assert_eq!(unfiltered.banner, None);
    assert_eq!(
        fallback.banner,
        Some(Banner::Warning(
            "No alumni profiles found matching \"quantum\". Showing all profiles instead."
                .into()
        ))
    );
}

#[test]
fn alumni_college_crumb_returns_to_branches() {
    let mut controller = loaded_branches("MJCET", &["CSE"]);
    let request = controller.select_branch("CSE").expect("select branch");
    controller.apply(
        request.ticket,
        Ok(DirectoryPayload::Alumni(vec![AlumniRecord::new("A")])),
    );

    assert_eq!(controller.activate_crumb(2), Err(NavigationError::CurrentCrumb));
    assert_eq!(
        controller.activate_crumb(3),
        Err(NavigationError::NoSuchCrumb {
            index: 3,
            available: 3
        })
    );
    assert_eq!(controller.level(), Level::Alumni);

    let request = controller.activate_crumb(1).expect("college crumb");
    assert_eq!(
        request.target,
        FetchTarget::Branches {
            college: "MJCET".into()
        }
    );
    assert_eq!(controller.selection().branch(), None);
}

#[test]
fn back_button_action_matches_back_navigation() {
    let mut controller = loaded_branches("MJCET", &["CSE"]);
    let request = controller.select_branch("CSE").expect("select branch");
    controller.apply(request.ticket, Ok(DirectoryPayload::Alumni(Vec::new())));

    let back = controller.view().back.expect("alumni view has a back button");
    let via_view = controller.clone().dispatch(back.action).expect("dispatch");
    let via_back = controller.back().expect("back");
    assert_eq!(via_view.target, via_back.target);
}

#[test]
fn alumni_filter_matches_bio() {
    let mut controller = loaded_branches("MJCET", &["CSE"]);
    let request = controller.select_branch("CSE").expect("select branch");
    controller.apply(
        request.ticket,
        Ok(DirectoryPayload::Alumni(vec![
            AlumniRecord::new("A").with_bio("robotics"),
            AlumniRecord::new("B"),
        ])),
    );

    controller.set_filter("  robot ");
    assert_eq!(controller.filter(), "robot");
    assert_eq!(controller.view().card_titles(), vec!["A"]);
    assert_eq!(
        controller.activate_card(0),
        Err(NavigationError::CardNotSelectable)
    );
}

#[test]
fn filter_resets_when_level_changes() {
    let mut controller = loaded_colleges(&["MJCET", "Lords Institute"]);
    controller.set_filter("mj");
    controller.activate_card(0).expect("open college");
    assert_eq!(controller.filter(), "");
}

#[test]
fn card_activation_out_of_range_is_rejected() {
    let mut controller = loaded_colleges(&["MJCET"]);
    assert_eq!(
        controller.activate_card(3),
        Err(NavigationError::NoSuchCard {
            index: 3,
            available: 1
        })
    );
    assert_eq!(controller.level(), Level::Colleges);
}

#[test]
fn failed_fetch_keeps_previous_list() {
    let mut controller = loaded_branches("MJCET", &["CSE", "ECE"]);
    controller.back().expect("back to colleges");
    let request = controller.select_college("X");

    assert!(controller.apply(
        request.ticket,
        Err(FetchError::Status {
            status: 500,
            code: None,
            detail: None
        })
    ));
    assert_eq!(controller.branches(), ["CSE", "ECE"]);
    assert_eq!(
        controller.view().banner,
        Some(Banner::Error(
            "Unable to load branches: HTTP error! Status: 500".into()
        ))
    );
    assert!(controller.view().cards.is_empty());
}

#[test]
fn stale_response_from_abandoned_level_is_discarded() {
    let mut controller = loaded_colleges(&["MJCET", "Lords Institute"]);
    let slow = controller.select_college("MJCET");
    let current = controller.open_colleges();

    assert!(!controller.apply(
        slow.ticket,
        Ok(DirectoryPayload::Branches(strings(&["CSE"])))
    ));
    assert!(controller.branches().is_empty());
    assert!(controller.is_loading());

    assert!(controller.apply(
        current.ticket,
        Ok(DirectoryPayload::Colleges(strings(&["MJCET"])))
    ));
    assert_eq!(controller.view().card_titles(), vec!["MJCET"]);
}

#[test]
fn superseded_request_for_same_level_is_discarded() {
    let mut controller = loaded_colleges(&["MJCET", "Lords Institute"]);
    let first = controller.select_college("MJCET");
    controller.back().expect("back");
    let second = controller.select_college("Lords Institute");
    assert!(second.ticket.generation > first.ticket.generation);

    assert!(controller.apply(
        second.ticket,
        Ok(DirectoryPayload::Branches(strings(&["ECE"])))
    ));
    assert!(!controller.apply(
        first.ticket,
        Ok(DirectoryPayload::Branches(strings(&["CSE"])))
    ));
    assert_eq!(controller.view().card_titles(), vec!["ECE"]);
}

#[test]
fn payload_for_wrong_level_is_reported_as_error() {
    let mut controller = NavigationController::new();
    let request = controller.open_colleges();
    controller.apply(
        request.ticket,
        Ok(DirectoryPayload::Alumni(vec![AlumniRecord::new("A")])),
    );
    assert!(controller.alumni().is_empty());
    assert!(matches!(controller.view().banner, Some(Banner::Error(_))));
}

#[test]
fn filtering_while_loading_keeps_placeholder() {
    let mut controller = loaded_colleges(&["MJCET"]);
    controller.select_college("MJCET");
    controller.set_filter("cse");
    assert_eq!(
        controller.view().banner,
        Some(Banner::Loading("Loading branches...".into()))
    );
}
