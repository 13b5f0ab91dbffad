pub mod experiment_dataset;
