use std::f64::consts::PI;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use oxmpl::base::goal_region::GoalState;
use oxmpl::base::spaces::{RealVectorBounds, RealVectorStateSpace, SO2StateSpace, SO3StateSpace};
use oxmpl::base::state_validity_checker::FunctionalValidityChecker;
use oxmpl::error::PlannerError;
use oxmpl::geometric::{Prm, Rrt, RrtConnect, RrtStar};
use oxmpl::prelude::*;

fn real_vector_wall_checker() -> Arc<dyn ValidityChecker> {
    Arc::new(FunctionalValidityChecker::new(|state: &State| {
        let v = state.as_real_vector();
        let (x, y) = (v[0], v[1]);
        let in_wall = (4.75..=5.25).contains(&x) && (2.0..=8.0).contains(&y);
        !in_wall
    }))
}

fn so2_forbidden_arc_checker() -> Arc<dyn ValidityChecker> {
    Arc::new(FunctionalValidityChecker::new(|state: &State| {
        let angle = state.as_so2();
        !(-0.5..=0.5).contains(&angle)
    }))
}

fn quaternion_from_y_axis_angle(angle: f64) -> (f64, f64, f64, f64) {
    let half = angle * 0.5;
    (0.0, half.sin(), 0.0, half.cos())
}

#[test]
fn rrt_solves_real_vector_problem_with_wall() {
    let mut bounds = RealVectorBounds::new(2);
    bounds.set_low(0.0);
    bounds.set_high(10.0);
    let space: Arc<dyn StateSpace> = Arc::new(RealVectorStateSpace::new(bounds.clone()).unwrap());
    let start = State::real_vector([1.0, 5.0]);
    let goal_target = State::real_vector([9.0, 5.0]);
    let goal = Arc::new(Mutex::new(GoalState::new(space.clone(), goal_target, 0.5)));

    let problem = Arc::new(
        ProblemDefinition::from_real_vector(bounds, [1.0, 5.0], goal.clone() as Arc<Mutex<dyn GoalRegion>>)
            .unwrap(),
    );

    let checker = real_vector_wall_checker();
    let mut planner = Rrt::new(problem)
        .with_max_distance(0.5)
        .with_goal_bias(0.05)
        .with_seed(1);
    planner.setup(checker.clone());

    let path = planner
        .solve(Duration::from_secs(20))
        .expect("rrt should find a path around the wall");

    assert!(path.len() > 1, "path should contain more than the start state");
    assert!(space.equal_states(&path.states()[0], &start, 1e-9));
    let last = path.states().last().unwrap();
    assert!(goal.lock().unwrap().is_satisfied(last).unwrap());
    for state in path.states() {
        assert!(checker.is_valid(state).unwrap());
    }
}

#[test]
fn rrt_connect_solves_real_vector_problem_with_wall() {
    let mut bounds = RealVectorBounds::new(2);
    bounds.set_low(0.0);
    bounds.set_high(10.0);
    let space: Arc<dyn StateSpace> = Arc::new(RealVectorStateSpace::new(bounds.clone()).unwrap());
    let start = State::real_vector([1.0, 5.0]);
    let goal_target = State::real_vector([9.0, 5.0]);
    let goal = Arc::new(Mutex::new(GoalState::new(space.clone(), goal_target, 0.5)));

    let problem = Arc::new(
        ProblemDefinition::from_real_vector(bounds, [1.0, 5.0], goal.clone() as Arc<Mutex<dyn GoalRegion>>)
            .unwrap(),
    );

    let checker = real_vector_wall_checker();
    let mut planner = RrtConnect::new(problem)
        .with_max_distance(0.5)
        .with_seed(7);
    planner.setup(checker.clone());

    let path = planner
        .solve(Duration::from_secs(20))
        .expect("rrt-connect should find a path around the wall");

    assert!(path.len() > 1);
    assert!(space.equal_states(&path.states()[0], &start, 1e-9));
    let last = path.states().last().unwrap();
    assert!(goal.lock().unwrap().is_satisfied(last).unwrap());
    for state in path.states() {
        assert!(checker.is_valid(state).unwrap());
    }
}

#[test]
fn rrt_solves_so2_problem_with_forbidden_arc() {
    let space: Arc<dyn StateSpace> = Arc::new(SO2StateSpace::new());
    let start_angle = -PI / 2.0;
    let goal_target = State::so2(PI / 2.0);
    let goal = Arc::new(Mutex::new(GoalState::new(space.clone(), goal_target, 0.1)));

    let problem = Arc::new(
        ProblemDefinition::from_so2(start_angle, goal.clone() as Arc<Mutex<dyn GoalRegion>>).unwrap(),
    );

    let checker = so2_forbidden_arc_checker();
    let mut planner = Rrt::new(problem)
        .with_max_distance(0.5)
        .with_goal_bias(0.05)
        .with_seed(2);
    planner.setup(checker.clone());

    let path = planner
        .solve(Duration::from_secs(10))
        .expect("rrt should find a path around the forbidden arc");

    assert!(path.len() > 1);
    assert!(space.equal_states(&path.states()[0], &State::so2(start_angle), 1e-9));
    let last = path.states().last().unwrap();
    assert!(goal.lock().unwrap().is_satisfied(last).unwrap());
    for state in path.states() {
        assert!(checker.is_valid(state).unwrap());
    }
}

#[test]
fn rrt_star_solves_so2_problem_with_forbidden_arc() {
    let space: Arc<dyn StateSpace> = Arc::new(SO2StateSpace::new());
    let start_angle = -PI / 2.0;
    let goal_target = State::so2(PI / 2.0);
    let goal = Arc::new(Mutex::new(GoalState::new(space.clone(), goal_target, 0.1)));

    let problem = Arc::new(
        ProblemDefinition::from_so2(start_angle, goal.clone() as Arc<Mutex<dyn GoalRegion>>).unwrap(),
    );

    let checker = so2_forbidden_arc_checker();
    let mut planner = RrtStar::new(problem, 0.25)
        .with_max_distance(0.5)
        .with_goal_bias(0.05)
        .with_seed(3);
    planner.setup(checker.clone());

    let path = planner
        .solve(Duration::from_secs(10))
        .expect("rrt* should find a path around the forbidden arc");

    assert!(path.len() > 1);
    assert!(space.equal_states(&path.states()[0], &State::so2(start_angle), 1e-9));
    let last = path.states().last().unwrap();
    assert!(goal.lock().unwrap().is_satisfied(last).unwrap());
    for state in path.states() {
        assert!(checker.is_valid(state).unwrap());
    }
}

#[test]
fn prm_solves_so3_problem_with_forbidden_cap() {
    let space: Arc<dyn StateSpace> = Arc::new(SO3StateSpace::new());
    let start_quat = quaternion_from_y_axis_angle(PI / 2.0);
    let goal_quat = quaternion_from_y_axis_angle(-PI / 2.0);
    let (gx, gy, gz, gw) = goal_quat;
    let goal_target = State::so3(gx, gy, gz, gw);
    let goal_radius = 10f64.to_radians();
    let goal = Arc::new(Mutex::new(GoalState::new(space.clone(), goal_target, goal_radius)));

    let problem = Arc::new(
        ProblemDefinition::from_so3(start_quat, goal.clone() as Arc<Mutex<dyn GoalRegion>>).unwrap(),
    );

    let forbidden_radius = 44.9f64.to_radians();
    let identity = State::so3_identity();
    let space_for_checker = space.clone();
    let checker: Arc<dyn ValidityChecker> = Arc::new(FunctionalValidityChecker::new(move |state: &State| {
        space_for_checker.distance(&identity, state) > forbidden_radius
    }));

    let mut planner = Prm::new(problem, Duration::from_secs(15), 0.6)
        .with_goal_samples(5)
        .with_max_roadmap_samples(500)
        .with_seed(4);
    planner.setup(checker.clone());
    planner
        .construct_roadmap()
        .expect("roadmap construction should succeed once configured");

    let path = planner
        .solve(Duration::from_secs(15))
        .expect("prm should find a path around the forbidden cap");

    assert!(path.len() > 1);
    let (sx, sy, sz, sw) = start_quat;
    assert!(space.equal_states(&path.states()[0], &State::so3(sx, sy, sz, sw), 1e-9));
    let last = path.states().last().unwrap();
    assert!(goal.lock().unwrap().is_satisfied(last).unwrap());
    for state in path.states() {
        assert!(checker.is_valid(state).unwrap());
    }
}

#[test]
fn rrt_times_out_when_the_goal_is_unreachable() {
    let mut bounds = RealVectorBounds::new(2);
    bounds.set_low(0.0);
    bounds.set_high(10.0);
    let space: Arc<dyn StateSpace> = Arc::new(RealVectorStateSpace::new(bounds.clone()).unwrap());
    let start = State::real_vector([1.0, 5.0]);
    let goal_target = State::real_vector([9.0, 5.0]);
    let goal = Arc::new(Mutex::new(GoalState::new(space.clone(), goal_target, 0.5)));

    let problem = Arc::new(
        ProblemDefinition::from_real_vector(bounds, [1.0, 5.0], goal as Arc<Mutex<dyn GoalRegion>>)
            .unwrap(),
    );

    // A wall spanning the whole width of the space leaves no way across.
    let checker: Arc<dyn ValidityChecker> = Arc::new(FunctionalValidityChecker::new(|state: &State| {
        let x = state.as_real_vector()[0];
        !(4.9..=5.1).contains(&x)
    }));

    let mut planner = Rrt::new(problem)
        .with_max_distance(0.5)
        .with_goal_bias(0.05)
        .with_seed(5);
    planner.setup(checker);

    let result = planner.solve(Duration::from_millis(200));
    assert!(matches!(result, Err(PlannerError::Timeout)));
    let _ = start;
}
