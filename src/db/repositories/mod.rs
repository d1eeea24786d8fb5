mod beans;
mod recommendations;
mod shots;
