pub mod coinranking;
