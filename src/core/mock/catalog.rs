//! Fixed vocabularies for sample records

pub const NAMES: [&str; 50] = [
    "ADILSON RAIMUNDO",
    "ADRIANO GALVÃO DE GÓIS",
    "ADRIANO ROSA",
    "ADRENA FONSECA DE SOUSA",
    "ADRIANA FERREIRA DE OLIVEIRA",
    "EDUARDO GALDINO DE SOUZA",
    "JOÃO SILVA SANTOS",
    "MARIA OLIVEIRA COSTA",
    "PEDRO RODRIGUES ALVES",
    "ANA PAULA FERREIRA",
    "CARLOS EDUARDO SOUZA",
    "JULIANA MARTINS LIMA",
    "FERNANDO HENRIQUE ROCHA",
    "PATRICIA SILVA GOMES",
    "RICARDO ALVES PEREIRA",
    "CAMILA COSTA RIBEIRO",
    "LUCAS FERNANDES CARVALHO",
    "BEATRIZ SOUZA ARAÚJO",
    "RAFAEL SANTOS DIAS",
    "AMANDA LIMA CARDOSO",
    "GUSTAVO PEREIRA CASTRO",
    "LARISSA MARTINS CORREIA",
    "BRUNO OLIVEIRA BARBOSA",
    "GABRIELA FERREIRA MONTEIRO",
    "THIAGO COSTA NASCIMENTO",
    "MARIANA ALVES TEIXEIRA",
    "DIEGO SILVA DUARTE",
    "ISABELLA SANTOS RAMOS",
    "VINICIUS RODRIGUES MOREIRA",
    "LETICIA OLIVEIRA BARROS",
    "ANDRÉ FERREIRA CAMPOS",
    "CAROLINA COSTA XAVIER",
    "MARCELO SANTOS MOURA",
    "NATALIA SILVA MENDES",
    "FELIPE ALVES AZEVEDO",
    "VANESSA RODRIGUES NUNES",
    "RODRIGO SANTOS LOPES",
    "RENATA OLIVEIRA MELO",
    "EDUARDO COSTA FARIAS",
    "ALINE FERREIRA SIQUEIRA",
    "LEANDRO SILVA MACEDO",
    "FERNANDA SANTOS BATISTA",
    "DANIEL ALVES VIANA",
    "JULIANE RODRIGUES REIS",
    "MATEUS COSTA AGUIAR",
    "PRISCILA SILVA FREITAS",
    "CAIO SANTOS PINTO",
    "BIANCA OLIVEIRA CAVALCANTI",
    "LEONARDO FERREIRA MELO",
    "VIVIANE COSTA PIRES",
];

/// Shift codes: night, morning, afternoon
pub const SHIFTS: [&str; 3] = [
    "22:25 às 06:00 hrs",
    "06:50 às 14:20 hrs",
    "14:11 às 22:35 hrs",
];

pub const ROLES: [&str; 8] = [
    "Auxiliar Operações",
    "Operador Máquina II",
    "Operador Processo II",
    "Técnico Segurança Trabalho",
    "Assistente Admin Log",
    "Faxineira",
    "Analista",
    "Coordenador",
];

pub const EMAIL_DOMAINS: [&str; 4] = ["gmail.com", "hotmail.com", "outlook.com", "yahoo.com.br"];

/// (city, state) pairs for patient addresses
pub const CITIES: [(&str, &str); 5] = [
    ("São Paulo", "SP"),
    ("Campinas", "SP"),
    ("Rio de Janeiro", "RJ"),
    ("Belo Horizonte", "MG"),
    ("Curitiba", "PR"),
];

pub const STREETS: [&str; 6] = [
    "Rua das Flores",
    "Avenida Paulista",
    "Rua XV de Novembro",
    "Rua da Consolação",
    "Avenida Brasil",
    "Rua Sete de Setembro",
];
