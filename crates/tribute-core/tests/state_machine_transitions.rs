use tribute_core::{
    status_variant, toggled_status, wizard_transition, BadgeVariant, TicketStatus, WizardAction,
    WizardStep,
};

#[test]
fn wizard_forward_path_transitions() {
    let (s1, _) =
        wizard_transition(WizardStep::DeceasedInfo, WizardAction::Advance).expect("1 -> 2");
    assert_eq!(s1, WizardStep::UserInfo);
    let (s2, _) = wizard_transition(s1, WizardAction::Advance).expect("2 -> 3");
    assert_eq!(s2, WizardStep::PlanTheme);
    let (s3, t) = wizard_transition(s2, WizardAction::SubmitSucceeded).expect("3 -> submitted");
    assert_eq!(s3, WizardStep::Submitted);
    assert_eq!(t.reason, "submission_accepted");
}

#[test]
fn wizard_advance_is_capped_and_retreat_is_floored() {
    let (capped, _) =
        wizard_transition(WizardStep::PlanTheme, WizardAction::Advance).expect("cap at 3");
    assert_eq!(capped, WizardStep::PlanTheme);
    let (floored, _) =
        wizard_transition(WizardStep::DeceasedInfo, WizardAction::Retreat).expect("floor at 1");
    assert_eq!(floored, WizardStep::DeceasedInfo);
}

#[test]
fn wizard_submit_before_last_step_is_rejected() {
    let err = wizard_transition(WizardStep::UserInfo, WizardAction::SubmitSucceeded)
        .expect_err("must fail");
    assert!(err.to_string().contains("illegal wizard transition"));
}

#[test]
fn submitted_is_terminal() {
    for action in [
        WizardAction::Advance,
        WizardAction::Retreat,
        WizardAction::SubmitSucceeded,
    ] {
        wizard_transition(WizardStep::Submitted, action).expect_err("terminal state");
    }
}

#[test]
fn step_numbers_round_trip_for_form_steps() {
    for n in 1..=WizardStep::LAST_FORM_STEP {
        let step = WizardStep::from_number(n).expect("form step");
        assert_eq!(step.number(), n);
    }
    assert!(WizardStep::from_number(0).is_none());
    assert!(WizardStep::from_number(4).is_none());
}

#[test]
fn status_badges_map_known_and_unknown_values() {
    assert_eq!(status_variant(Some(TicketStatus::Open)), BadgeVariant::Info);
    assert_eq!(
        status_variant(Some(TicketStatus::Responded)),
        BadgeVariant::Warning
    );
    assert_eq!(
        status_variant(Some(TicketStatus::Closed)),
        BadgeVariant::Success
    );
    assert_eq!(
        status_variant(Some(TicketStatus::Unknown)),
        BadgeVariant::Default
    );
    assert_eq!(status_variant(None), BadgeVariant::Default);
}

#[test]
fn toggled_status_reopens_only_closed_tickets() {
    assert_eq!(toggled_status(Some(TicketStatus::Closed)), TicketStatus::Open);
    assert_eq!(toggled_status(Some(TicketStatus::Open)), TicketStatus::Closed);
    assert_eq!(
        toggled_status(Some(TicketStatus::Responded)),
        TicketStatus::Closed
    );
    assert_eq!(toggled_status(None), TicketStatus::Closed);
}
