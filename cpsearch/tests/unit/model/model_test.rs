use super::*;

fn create_model() -> (Model, VarId, VarId) {
    let mut model = Model::new("test");
    let x = model.new_int_var(0, 10, "x");
    let b = model.new_bool_var("b");

    model.add_constraint(LinearConstraint::le(LinearExpr::from(x), 4).only_enforce_if(b).with_name("x_limit"));
    model.add_constraint(LinearConstraint::ge(LinearExpr::new().term(1, x).term(1, b), 1));

    (model, x, b)
}

#[test]
fn can_create_variables_and_constraints() {
    let (model, x, b) = create_model();

    assert_eq!(model.name(), "test");
    assert_eq!(model.var_count(), 2);
    assert_eq!(model.constraint_count(), 2);
    assert_eq!(model.domain(x), Domain::new(0, 10));
    assert_eq!(model.domain(b), Domain::boolean());
    assert_eq!(model.var_name(b), "b");
}

#[test]
fn can_keep_minimization_as_negated_maximization() {
    let (mut model, x, b) = create_model();

    model.minimize(LinearExpr::new().term(2, x).term(-1, b).constant(3));

    assert_eq!(model.objective().evaluate(&[4, 1]), -(8 - 1 + 3));
}

#[test]
fn can_keep_decisions_in_order() {
    let (mut model, x, b) = create_model();

    model.add_decision(b, 1);
    model.add_decision(x, 7);

    assert_eq!(model.decisions(), &[Decision { var: b, preferred: 1 }, Decision { var: x, preferred: 7 }]);
}

parameterized_test! {can_check_values, (values, expected), {
    let (model, _, _) = create_model();

    let result = model.check_values(&values).map_err(|err| err.to_string());

    assert_eq!(result, expected.map_err(|err: &str| err.to_string()));
}}

can_check_values! {
    case01_valid: (vec![3, 1], Ok(())),
    case02_valid_inactive: (vec![9, 0], Ok(())),
    case03_named_violated: (vec![9, 1], Err("constraint 'x_limit' is violated")),
    case04_unnamed_violated: (vec![0, 0], Err("constraint '1' is violated")),
    case05_out_of_domain: (vec![11, 0], Err("value of 'x' is out of its domain")),
    case06_wrong_size: (vec![1], Err("expected 2 values, got 1")),
}
