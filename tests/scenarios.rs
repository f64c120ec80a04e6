//! End-to-end walks through the deadline lifecycle.

use jiff::civil::date;
use tome::flow::{self, DetourOutcome, Executed, Plan};
use tome::model::{
    Deadline, Flexibility, Format, NewDeadline, ReviewData, ReviewPlatform, Status,
};
use tome::pace::{self, DailyRate, PaceInput};
use tome::transition::{Confirmation, Decision, Detour};
use tome::{Error, completion, duration};

fn book(initial_status: Status, starting_progress: u32) -> Deadline {
    Deadline::new(NewDeadline {
        title: "A Memory Called Empire".into(),
        author: Some("Arkady Martine".into()),
        format: Format::Physical,
        total_quantity: 300,
        deadline_date: date(2026, 11, 15),
        flexibility: Flexibility::Flexible,
        initial_status,
        starting_progress,
    })
    .unwrap()
}

fn platform(name: &str, posted: bool) -> ReviewPlatform {
    ReviewPlatform {
        id: name.to_lowercase(),
        platform_name: name.into(),
        posted,
        posted_date: None,
        review_url: None,
    }
}

fn run(deadline: &mut Deadline, plan: &Plan) -> Executed {
    let id = deadline.id;
    flow::execute(deadline, id, plan).unwrap()
}

#[test]
fn normalizer_edge_cases() {
    assert!(matches!(
        duration::to_hours_and_minutes(-1),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        duration::to_total_minutes(-1.0, 0.0),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        duration::to_total_minutes(0.0, 60.0),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn completion_boundaries() {
    assert!(completion::is_fully_complete(300, 300).unwrap());
    assert!(!completion::is_fully_complete(299, 300).unwrap());
    assert!(completion::is_fully_complete(301, 300).unwrap());
}

#[test]
fn audiobook_pace_in_hours_and_minutes() {
    let total = duration::to_total_minutes(10.0, 30.0).unwrap();
    let current = duration::to_total_minutes(5.0, 45.0).unwrap();
    assert!((total - 630.0).abs() < f64::EPSILON);
    assert!((current - 345.0).abs() < f64::EPSILON);

    let input = PaceInput {
        format: Format::Audio,
        total_quantity: total,
        total_minutes: None,
        current_progress: current,
        current_minutes: None,
        deadline_date: Some(date(2026, 10, 22)),
    };
    let estimate = pace::estimate(&input, date(2026, 10, 17)).unwrap().unwrap();

    assert!((estimate.remaining - 285.0).abs() < f64::EPSILON);
    assert_eq!(estimate.rate, Some(DailyRate::Listening { per_day: 57.0 }));
    assert_eq!(estimate.to_string(), "57m/day");
}

#[test]
fn unfinished_review_declined_detours_to_did_not_finish() {
    let mut deadline = book(Status::Reading, 100);

    let decision = flow::request(&deadline, Status::ToReview, &ReviewData::default()).unwrap();
    let Decision::Confirm(confirmation) = decision else {
        panic!("expected confirmation, got {decision:?}");
    };
    assert_eq!(
        confirmation,
        Confirmation::UnfinishedReview {
            progress: 100,
            total: 300
        }
    );

    let plan = flow::answer(&confirmation, false).unwrap();
    let executed = run(&mut deadline, &plan);
    let Executed::Detoured(detour) = executed else {
        panic!("expected a detour, got {executed:?}");
    };
    assert_eq!(
        detour,
        Detour {
            from: Status::Reading,
            requested: Status::DidNotFinish,
            fully_complete: false,
        }
    );
    assert_eq!(deadline.current_status(), Status::Reading);

    let plan = flow::finish_detour(
        &detour,
        DetourOutcome::Finalize {
            final_progress: None,
        },
        deadline.current_progress(),
        deadline.total_quantity,
    )
    .unwrap();
    run(&mut deadline, &plan);
    assert_eq!(deadline.current_status(), Status::DidNotFinish);
    assert!(deadline.is_finalized());
}

#[test]
fn unposted_review_needs_a_second_confirmed_call() {
    let mut deadline = book(Status::Reading, 300);
    let plan = Plan::from_decision(
        &flow::request(&deadline, Status::ToReview, &ReviewData::default()).unwrap(),
    )
    .unwrap();
    run(&mut deadline, &plan);
    assert_eq!(deadline.current_status(), Status::ToReview);

    let reviews = ReviewData {
        platforms: vec![platform("NetGalley", false)],
        is_loading: false,
    };
    let decision = flow::request(&deadline, Status::Complete, &reviews).unwrap();
    let Decision::Confirm(confirmation) = &decision else {
        panic!("expected confirmation, got {decision:?}");
    };
    let Confirmation::UnpostedReviews { platforms, .. } = confirmation else {
        panic!("expected unposted reviews, got {confirmation:?}");
    };
    assert_eq!(platforms, &vec!["NetGalley".to_string()]);

    // Nothing is written until the reader answers.
    assert!(Plan::from_decision(&decision).is_none());
    assert_eq!(deadline.current_status(), Status::ToReview);

    let plan = flow::answer(confirmation, true).unwrap();
    run(&mut deadline, &plan);
    assert_eq!(deadline.current_status(), Status::Complete);
}

#[test]
fn complete_has_no_outgoing_transitions() {
    let mut deadline = book(Status::Reading, 300);
    let detour = match flow::request(&deadline, Status::Complete, &ReviewData::default()).unwrap() {
        Decision::Detour(detour) => detour,
        other => panic!("expected detour, got {other:?}"),
    };
    let plan = flow::finish_detour(
        &detour,
        DetourOutcome::Finalize {
            final_progress: None,
        },
        300,
        300,
    )
    .unwrap();
    run(&mut deadline, &plan);
    assert_eq!(deadline.current_status(), Status::Complete);

    for target in Status::ALL {
        let err = flow::request(&deadline, target, &ReviewData::default()).unwrap_err();
        assert!(
            matches!(
                err,
                flow::RequestError::Core(Error::IllegalTransition {
                    from: Status::Complete,
                    ..
                })
            ),
            "complete -> {target} should be illegal"
        );
    }
}

#[test]
fn applied_copy_rejected_by_publisher() {
    let mut deadline = book(Status::Applied, 0);

    let back = flow::request(&deadline, Status::Pending, &ReviewData::default()).unwrap();
    run(&mut deadline, &Plan::from_decision(&back).unwrap());
    assert_eq!(deadline.current_status(), Status::Pending);

    let rejected = flow::request(&deadline, Status::Rejected, &ReviewData::default()).unwrap();
    assert_eq!(
        rejected,
        Decision::Instant {
            write: Status::Rejected
        }
    );
    run(&mut deadline, &Plan::from_decision(&rejected).unwrap());
    assert!(deadline.is_finalized());
    assert!(matches!(
        deadline.record_progress(10, jiff::Timestamp::now()),
        Err(Error::Finalized(_))
    ));
}
