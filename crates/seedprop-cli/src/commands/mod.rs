pub mod evaluate;
pub mod propagate;
pub mod run;
