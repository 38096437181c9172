mod corpus;
mod referenced_entities;
