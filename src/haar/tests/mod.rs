mod topology_tests;
mod coord_tests;
mod evaluator_tests;
