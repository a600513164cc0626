use crate::model::*;

/// Creates a 0-1 knapsack model: maximize Σ value_i * x_i subject to Σ weight_i * x_i <= capacity.
pub fn create_knapsack_model(items: &[(i64, i64)], capacity: i64) -> (Model, Vec<VarId>) {
    let mut model = Model::new("knapsack");
    let vars = (0..items.len()).map(|idx| model.new_bool_var(format!("x[{idx}]"))).collect::<Vec<_>>();

    let weights = items.iter().zip(vars.iter()).fold(LinearExpr::new(), |acc, (&(weight, _), &var)| acc.term(weight, var));
    let values = items.iter().zip(vars.iter()).fold(LinearExpr::new(), |acc, (&(_, value), &var)| acc.term(value, var));

    model.add_constraint(LinearConstraint::le(weights, capacity).with_name("capacity"));
    model.maximize(values);

    (model, vars)
}

/// Returns the optimal knapsack value by enumerating all subsets.
pub fn get_knapsack_optimum(items: &[(i64, i64)], capacity: i64) -> i64 {
    (0_u32..(1 << items.len()))
        .filter_map(|mask| {
            let (weight, value) = items
                .iter()
                .enumerate()
                .filter(|(idx, _)| mask & (1 << idx) != 0)
                .fold((0, 0), |(w, v), (_, &(weight, value))| (w + weight, v + value));

            (weight <= capacity).then_some(value)
        })
        .max()
        .unwrap_or(0)
}
